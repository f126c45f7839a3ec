mod articles;
mod health_check;
mod helpers;
