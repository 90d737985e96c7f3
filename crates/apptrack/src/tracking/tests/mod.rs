mod common;

mod audit;
mod runner;
