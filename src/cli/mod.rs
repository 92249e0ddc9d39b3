pub mod cli;
pub mod run;
pub mod run_search;
pub mod run_server;
