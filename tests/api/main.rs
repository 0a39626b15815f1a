mod blog;
mod health_check;
mod helpers;
