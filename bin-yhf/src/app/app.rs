use log::info;
use clap::{Parser, Subcommand};

use super::cmd::homfly;
use super::err::AppResult;
use super::utils::{guard_panic, measure};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Cmd
}

#[derive(Subcommand, Debug)]
#[clap(rename_all="lower")]
pub enum Cmd {
    /// HOMFLY polynomial of a braid closure.
    Homfly(homfly::Args),
}

impl CliArgs {
    fn log_level(&self) -> log::LevelFilter {
        use log::LevelFilter::*;
        let level = match &self.command {
            Cmd::Homfly(args) => args.log,
        };
        match level {
            1 => Info,
            2 => Debug,
            3 => Trace,
            _ => Off,
        }
    }
}

pub struct App {
    pub args: CliArgs
}

impl App {
    pub fn new() -> Self {
        let args = CliArgs::parse();
        App { args }
    }

    pub fn run(&self) -> AppResult<String> {
        self.init_logger();

        info!("args: {:?}", self.args);

        let (res, time) = measure(||
            self.dispatch()
        );

        info!("time: {:?}", time);

        res
    }

    fn init_logger(&self) {
        let l = self.args.log_level();
        if let Err(e) = yui::util::log::init_simple_logger(l) {
            eprintln!("failed to initialize logger: {e}");
        }
    }

    fn dispatch(&self) -> AppResult<String> {
        guard_panic(||
            match &self.args.command {
                Cmd::Homfly(args) => homfly::dispatch(args),
            }
        )
    }
}
