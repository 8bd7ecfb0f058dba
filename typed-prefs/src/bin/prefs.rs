use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;
use tracing::{debug, Level};
use typed_prefs::{PrefErrorKind, PrefStore, PrefValue, Result, SledStore, TypedPreference};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: SubCommand,

    #[clap(long)]
    #[clap(help = "Directory of the preference database, defaults to the working directory")]
    dir: Option<PathBuf>,

    #[clap(short, long)]
    #[clap(help = "Print debug logs to stderr")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    #[clap(about = "Get the value of a preference")]
    Get {
        #[clap(help = "The preference key")]
        key: String,
        #[clap(long = "type", default_value_t = ValueType::Str)]
        #[clap(help = "Type of the value: int, float, string or bool")]
        ty: ValueType,
        #[clap(long)]
        #[clap(help = "Value printed when the key holds nothing usable")]
        default: Option<String>,
    },

    #[clap(about = "Set the value of a preference")]
    Set {
        #[clap(help = "The preference key")]
        key: String,
        #[clap(help = "The value assigned to key")]
        val: String,
        #[clap(long = "type", default_value_t = ValueType::Str)]
        #[clap(help = "Type of the value: int, float, string or bool")]
        ty: ValueType,
    },

    #[clap(about = "Store the default value of a preference")]
    Reset {
        #[clap(help = "The preference key")]
        key: String,
        #[clap(long)]
        #[clap(help = "The default value of the preference")]
        default: String,
        #[clap(long = "type", default_value_t = ValueType::Str)]
        #[clap(help = "Type of the value: int, float, string or bool")]
        ty: ValueType,
    },

    #[clap(about = "Remove a preference")]
    Rm {
        #[clap(help = "The preference key to remove")]
        key: String,
    },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum ValueType {
    Int,
    Float,
    Str,
    Bool,
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::Str),
            "bool" => Ok(Self::Bool),
            _ => Err(Self::Err::from("Unsupported value type")),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

// run $op::<T> with T picked from the --type argument
macro_rules! with_type {
    ($ty:expr, $op:ident($($arg:expr),*)) => {
        match $ty {
            ValueType::Int => $op::<i64>($($arg),*),
            ValueType::Float => $op::<f64>($($arg),*),
            ValueType::Str => $op::<String>($($arg),*),
            ValueType::Bool => $op::<bool>($($arg),*),
        }
    };
}

fn main() {
    let Args {
        command,
        dir,
        verbose,
    } = Args::parse();

    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    if let Err(error) = run(command, dir) {
        eprintln!("{}", error);
        exit(1);
    }
}

fn run(command: SubCommand, dir: Option<PathBuf>) -> Result<()> {
    let dirpath = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    debug!(dir = %dirpath.display(), "opening preference store");

    let store = SledStore::open(&dirpath)?;
    match command {
        SubCommand::Get { key, ty, default } => with_type!(ty, get(store, key, default)),
        SubCommand::Set { key, val, ty } => with_type!(ty, set(store, key, val)),
        SubCommand::Reset { key, default, ty } => with_type!(ty, reset(store, key, default)),
        SubCommand::Rm { key } => store.delete(&key),
    }
}

fn parse<T: FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| PrefErrorKind::InvalidValue.into())
}

fn get<T>(store: SledStore, key: String, default: Option<String>) -> Result<()>
where
    T: PrefValue + Clone + FromStr + fmt::Display,
{
    match default {
        Some(text) => {
            let pref = TypedPreference::new(store, key, parse::<T>(&text)?);
            println!("{}", pref.get());
        }
        None => {
            // no default to fall back to, so absence has to be visible
            let raw = store.read(&key)?;
            match raw.as_ref().and_then(T::from_raw) {
                Some(val) => println!("{}", val),
                None => println!("Key not found"),
            }
        }
    }
    Ok(())
}

fn set<T>(store: SledStore, key: String, val: String) -> Result<()>
where
    T: PrefValue + Clone + FromStr,
{
    let val = parse::<T>(&val)?;
    // the default is never read by `set`
    TypedPreference::new(store, key, val.clone()).set(val)
}

fn reset<T>(store: SledStore, key: String, default: String) -> Result<()>
where
    T: PrefValue + Clone + FromStr,
{
    TypedPreference::new(store, key, parse::<T>(&default)?).reset()
}
