//! gnat, the command-line NAT discovery client.

#![warn(deprecated_in_future)]
#![warn(future_incompatible)]
#![warn(missing_copy_implementations)]
#![warn(missing_docs)]
#![warn(nonstandard_style)]
#![warn(rust_2018_compatibility)]
#![warn(rust_2018_idioms)]
#![warn(single_use_lifetimes)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused)]

#![deny(unsafe_code)]


use std::env;
use std::process::exit;

use log::*;

use stun_discovery::QueryError;

mod colours;
mod output;
mod resolve;

mod options;
use self::options::*;


/// Configures logging, parses the command-line options, and handles any
/// errors before passing control over to the Gnat type.
fn main() {
    configure_logger();

    match Options::getopts(env::args_os().skip(1)) {
        OptionsResult::Ok(options) => {
            info!("Running with options -> {:#?}", options);
            let gnat = Gnat::init(options);
            exit(gnat.run());
        }

        OptionsResult::Help(help_reason, _use_colours) => {
            print!("{}", options::USAGE);

            if help_reason == HelpReason::NoServer {
                exit(exits::OPTIONS_ERROR);
            }
            else {
                exit(exits::SUCCESS);
            }
        }

        OptionsResult::Version(_use_colours) => {
            println!("gnat v{}", env!("CARGO_PKG_VERSION"));
            exit(exits::SUCCESS);
        }

        OptionsResult::InvalidOptionsFormat(oe) => {
            eprintln!("Invalid options: {}", oe);
            exit(exits::OPTIONS_ERROR);
        }

        OptionsResult::InvalidOptions(why) => {
            eprintln!("{}", why);
            exit(exits::OPTIONS_ERROR);
        }
    }
}


/// Checks the `GNAT_DEBUG` environment variable, enabling debug logging if
/// it’s non-empty.
fn configure_logger() {
    let present = match env::var_os("GNAT_DEBUG") {
        Some(debug)  => debug.len() > 0,
        None         => false,
    };

    let mut logs = env_logger::Builder::new();
    if present {
        let _ = logs.filter(None, log::LevelFilter::Trace);
    }
    else {
        let _ = logs.filter(None, log::LevelFilter::Off);
    }

    logs.init()
}


struct Gnat {
    options: Options,
}

impl Gnat {
    fn init(options: Options) -> Self {
        Self { options }
    }

    fn run(self) -> i32 {
        let Options { server, query_type, variant, local_bind, config, format } = self.options;

        let server = match resolve::resolve_server(&server) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                eprintln!("{}", e);
                return exits::OPTIONS_ERROR;
            }
        };

        match stun_discovery::query(server, query_type, variant, local_bind, &config) {
            Ok(result) => {
                format.print(&result);

                if result.error == QueryError::Success {
                    exits::SUCCESS
                }
                else {
                    eprintln!("{}", result.error);
                    exits::QUERY_ERROR
                }
            }
            Err(e) => {
                format.print_error(&e);
                exits::NETWORK_ERROR
            }
        }
    }
}


mod exits {

    /// Exit code for when everything turns out OK.
    pub const SUCCESS: i32 = 0;

    /// Exit code for when the discovery run ended with anything other than
    /// a verdict. The name of the query error goes to standard error.
    pub const QUERY_ERROR: i32 = 1;

    /// Exit code for when there was a network error during execution.
    pub const NETWORK_ERROR: i32 = 2;

    /// Exit code for when the command-line options are invalid.
    pub const OPTIONS_ERROR: i32 = 3;
}
