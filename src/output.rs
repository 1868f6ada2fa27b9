//! Text and JSON output.

use std::env;

use ansi_term::Style;
use json::{object, JsonValue};

use stun_discovery::{Error as TransportError, NatType, QueryResult};

use crate::colours::Colours;


/// How to format the output data.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum OutputFormat {

    /// Format the output as plain text, optionally adding ANSI colours.
    Text(UseColours),

    /// Format the result as JSON.
    JSON,
}


/// When to use colours in the output.
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum UseColours {

    /// Always use colours.
    Always,

    /// Use colours if output is to a terminal; otherwise, do not.
    Automatic,

    /// Never use colours.
    Never,
}

impl UseColours {

    /// Whether we should use colours or not. This checks whether the user has
    /// overridden the colour setting, and if not, whether output is to a
    /// terminal.
    pub fn should_use_colours(self) -> bool {
        self == Self::Always || (atty::is(atty::Stream::Stdout) && env::var("NO_COLOR").is_err() && self != Self::Never)
    }

    /// Creates a palette of colours depending on the user’s wishes or whether
    /// output is to a terminal.
    pub fn palette(self) -> Colours {
        if self.should_use_colours() {
            Colours::pretty()
        }
        else {
            Colours::plain()
        }
    }

    pub(crate) fn deduce(matches: &getopts::Matches) -> Self {
        match matches.opt_str("color").or_else(|| matches.opt_str("colour")).unwrap_or_default().as_str() {
            "automatic" | "auto" | ""  => Self::Automatic,
            "always"    | "yes"        => Self::Always,
            "never"     | "no"         => Self::Never,
            otherwise => {
                log::warn!("Unknown colour setting {:?}", otherwise);
                Self::Automatic
            },
        }
    }
}


impl OutputFormat {

    pub(crate) fn deduce(matches: &getopts::Matches) -> Self {
        if matches.opt_present("json") {
            Self::JSON
        }
        else {
            Self::Text(UseColours::deduce(matches))
        }
    }

    /// Prints everything the discovery run found out, formatted according
    /// to the settings.
    pub fn print(self, result: &QueryResult) {
        match self {
            Self::Text(uc) => {
                print_text(&uc.palette(), result);
            }
            Self::JSON => {
                println!("{}", json_result(result));
            }
        }
    }

    /// Prints a network-level error, formatted according to the settings.
    pub fn print_error(self, error: &TransportError) {
        match self {
            Self::Text(_) => {
                eprintln!("Error [{}]", error);
            }
            Self::JSON => {
                let object = object! {
                    "error": error.to_string(),
                };

                eprintln!("{}", object);
            }
        }
    }
}


fn print_text(colours: &Colours, result: &QueryResult) {
    println!("{:<10} {}", "Server", colours.endpoint.paint(result.server.to_string()));

    if let Some(local) = result.local {
        println!("{:<10} {}", "Local", colours.endpoint.paint(local.to_string()));
    }

    if let Some(public) = result.public {
        println!("{:<10} {}", "Public", colours.endpoint.paint(public.to_string()));
    }

    if result.nat_type != NatType::Unspecified {
        let style = nat_type_style(colours, result.nat_type);
        println!("{:<10} {}", "NAT type", style.paint(result.nat_type.to_string()));
    }

    if let Some(mapping) = result.mapping {
        println!("{:<10} {}", "Mapping", colours.behavior.paint(mapping.to_string()));
    }

    if let Some(filtering) = result.filtering {
        println!("{:<10} {}", "Filtering", colours.behavior.paint(filtering.to_string()));
    }

    if let Some(se) = &result.server_error {
        println!("{:<10} {}", "Server said", colours.error.paint(se.to_string()));
    }
}

fn nat_type_style(colours: &Colours, nat_type: NatType) -> Style {
    match nat_type {
        NatType::OpenInternet => {
            colours.open
        }
        NatType::FullCone | NatType::Restricted | NatType::PortRestricted => {
            colours.cone
        }
        NatType::Symmetric | NatType::SymmetricUdpFirewall => {
            colours.symmetric
        }
        NatType::Unspecified => {
            colours.unspecified
        }
    }
}


fn json_result(result: &QueryResult) -> JsonValue {
    object! {
        "error": result.error.to_string(),
        "server": result.server.to_string(),
        "local": optional_string(result.local.map(|e| e.to_string())),
        "public": optional_string(result.public.map(|e| e.to_string())),
        "nat_type": result.nat_type.to_string(),
        "mapping": optional_string(result.mapping.map(|m| m.to_string())),
        "filtering": optional_string(result.filtering.map(|fb| fb.to_string())),
        "server_error": match &result.server_error {
            Some(se)  => object! { "code": se.code, "phrase": se.phrase.as_str() },
            None      => JsonValue::Null,
        },
    }
}

fn optional_string(value: Option<String>) -> JsonValue {
    match value {
        Some(string)  => JsonValue::String(string),
        None          => JsonValue::Null,
    }
}
