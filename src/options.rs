//! Command-line option parsing.

use std::ffi::OsStr;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use stun_discovery::{Config, DiscoveryVariant, QueryType};

use crate::output::{OutputFormat, UseColours};


/// The help text, displayed for `--help` or when no server is given.
pub static USAGE: &str = "\
Usage:
  gnat [options] <server:port>

Examples:
  gnat stun.example.org:3478
  gnat --discovery rfc5780 --query exact-nat 198.51.100.1:3478

Query options:
  -q, --query TYPE       Which question to ask: public-ip, open-nat,
                         or exact-nat (the default)
  -d, --discovery PROC   Which discovery procedure to run: rfc3489
                         (the default) or rfc5780

Sending options:
  -t, --timeout MS       How long to wait for each response, in
                         milliseconds (default 2000)
  -l, --local ADDR       Local address to bind the socket to, as ip:port

Output options:
      --color, --colour WHEN   When to use terminal colours
                               (always, automatic, never)
  -J, --json             Display the output as JSON

Meta options:
  -V, --version          Print version information
  -?, --help             Print list of command-line options
";


/// The command-line options used when running gnat.
#[derive(PartialEq, Debug)]
pub struct Options {

    /// The server to send probes to, as the user wrote it.
    pub server: String,

    /// Which question the discovery run should answer.
    pub query_type: QueryType,

    /// Which discovery procedure to run.
    pub variant: DiscoveryVariant,

    /// The local address to bind the socket to, if the user named one.
    pub local_bind: Option<SocketAddr>,

    /// The configuration handed to the discovery run.
    pub config: Config,

    /// How to format the output data.
    pub format: OutputFormat,
}

impl Options {

    /// Parses and interprets a set of options from the user’s command-line
    /// arguments.
    ///
    /// This returns an `Ok` set of options if successful and running
    /// normally, a `Help` or `Version` variant if one of those options is
    /// specified, or an error variant if there’s an invalid option or
    /// inconsistency within the options after they were parsed.
    #[allow(unused_results)]
    pub fn getopts<C>(args: C) -> OptionsResult
    where C: IntoIterator,
          C::Item: AsRef<OsStr>,
    {
        let mut opts = getopts::Options::new();

        // Query options
        opts.optopt ("q", "query",      "Which question to ask (public-ip, open-nat, exact-nat)", "TYPE");
        opts.optopt ("d", "discovery",  "Which discovery procedure to run (rfc3489, rfc5780)", "PROC");

        // Sending options
        opts.optopt ("t", "timeout",    "How long to wait for each response, in milliseconds", "MS");
        opts.optopt ("l", "local",      "Local address to bind the socket to", "ADDR");

        // Output options
        opts.optopt ("",  "color",      "When to use terminal colors",  "WHEN");
        opts.optopt ("",  "colour",     "When to use terminal colours", "WHEN");
        opts.optflag("J", "json",       "Display the output as JSON");

        // Meta options
        opts.optflag("V", "version",    "Print version information");
        opts.optflag("?", "help",       "Print list of command-line options");

        let matches = match opts.parse(args) {
            Ok(m)  => m,
            Err(e) => return OptionsResult::InvalidOptionsFormat(e),
        };

        let uc = UseColours::deduce(&matches);

        if matches.opt_present("version") {
            OptionsResult::Version(uc)
        }
        else if matches.opt_present("help") {
            OptionsResult::Help(HelpReason::Flag, uc)
        }
        else {
            match Self::deduce(matches) {
                Ok(opts) => {
                    if opts.server.is_empty() {
                        OptionsResult::Help(HelpReason::NoServer, uc)
                    }
                    else {
                        OptionsResult::Ok(opts)
                    }
                }
                Err(e) => {
                    OptionsResult::InvalidOptions(e)
                }
            }
        }
    }

    fn deduce(matches: getopts::Matches) -> Result<Self, OptionsError> {
        let format = OutputFormat::deduce(&matches);
        let query_type = deduce_query_type(&matches)?;
        let variant = deduce_variant(&matches)?;
        let local_bind = deduce_local_bind(&matches)?;
        let config = deduce_config(&matches)?;
        let server = deduce_server(matches)?;

        Ok(Self { server, query_type, variant, local_bind, config, format })
    }
}


fn deduce_query_type(matches: &getopts::Matches) -> Result<QueryType, OptionsError> {
    match matches.opt_str("query").as_deref() {
        None | Some("exact-nat")  => Ok(QueryType::ExactNat),
        Some("open-nat")          => Ok(QueryType::OpenNat),
        Some("public-ip")         => Ok(QueryType::PublicIp),
        Some(otherwise)           => Err(OptionsError::InvalidQueryType(otherwise.into())),
    }
}

fn deduce_variant(matches: &getopts::Matches) -> Result<DiscoveryVariant, OptionsError> {
    match matches.opt_str("discovery").as_deref() {
        None | Some("rfc3489")  => Ok(DiscoveryVariant::Rfc3489),
        Some("rfc5780")         => Ok(DiscoveryVariant::Rfc5780),
        Some(otherwise)         => Err(OptionsError::InvalidDiscovery(otherwise.into())),
    }
}

fn deduce_local_bind(matches: &getopts::Matches) -> Result<Option<SocketAddr>, OptionsError> {
    match matches.opt_str("local") {
        None => Ok(None),
        Some(addr_str) => {
            match addr_str.parse() {
                Ok(addr) => Ok(Some(addr)),
                Err(_)   => Err(OptionsError::InvalidLocalAddress(addr_str)),
            }
        }
    }
}

fn deduce_config(matches: &getopts::Matches) -> Result<Config, OptionsError> {
    let mut config = Config::default();

    if let Some(ms_str) = matches.opt_str("timeout") {
        match ms_str.parse::<u64>() {
            Ok(ms) if ms > 0 => {
                config.receive_timeout = Duration::from_millis(ms);
            }
            _ => {
                return Err(OptionsError::InvalidTimeout(ms_str));
            }
        }
    }

    Ok(config)
}

fn deduce_server(matches: getopts::Matches) -> Result<String, OptionsError> {
    let mut frees = matches.free.into_iter();
    let server = frees.next().unwrap_or_default();

    if let Some(extra) = frees.next() {
        return Err(OptionsError::TooManyServers(extra));
    }

    Ok(server)
}


/// The result of the `Options::getopts` function.
#[derive(PartialEq, Debug)]
pub enum OptionsResult {

    /// The options were parsed successfully.
    Ok(Options),

    /// There was an error (from `getopts`) parsing the arguments.
    InvalidOptionsFormat(getopts::Fail),

    /// There was an error with the combination of options the user selected.
    InvalidOptions(OptionsError),

    /// Can’t run any queries because there’s help to display!
    Help(HelpReason, UseColours),

    /// One of the arguments was `--version`, to display the version number.
    Version(UseColours),
}

/// The reason that help is being displayed. If it’s for the `--help` flag,
/// then we shouldn’t return an error exit status.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum HelpReason {

    /// Help was requested with the `--help` flag.
    Flag,

    /// There was no server to query, so display help instead.
    NoServer,
}

/// Something wrong with the combination of options the user has picked.
#[derive(PartialEq, Debug)]
pub enum OptionsError {
    InvalidQueryType(String),
    InvalidDiscovery(String),
    InvalidTimeout(String),
    InvalidLocalAddress(String),
    TooManyServers(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidQueryType(qt)     => write!(f, "Invalid query type {:?}", qt),
            Self::InvalidDiscovery(proc_)  => write!(f, "Invalid discovery procedure {:?}", proc_),
            Self::InvalidTimeout(ms)       => write!(f, "Invalid timeout {:?} (must be a positive number of milliseconds)", ms),
            Self::InvalidLocalAddress(la)  => write!(f, "Invalid local address {:?} (must be ip:port)", la),
            Self::TooManyServers(server)   => write!(f, "Too many servers (unexpected argument {:?})", server),
        }
    }
}
