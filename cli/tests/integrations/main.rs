mod check;
mod diagnose;
mod interactive;
mod rules;
