pub mod health;
pub mod run;
pub mod stop;
pub mod tasks;
