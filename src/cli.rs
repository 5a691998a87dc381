use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "fit2gpx", about = "Convert Garmin FIT activity files into GPX tracks", version)]
pub struct Cli {
    /// Path to the .fit file
    pub input: String,
    /// Output .gpx path ("-" for stdout); defaults to the input path with a .gpx extension
    pub output: Option<String>,
    /// Name written into the GPX track
    #[arg(long = "name")]
    pub name: Option<String>,
    /// Show a spinner while decoding
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,
    /// Print message kinds, counts and time span instead of converting
    #[arg(long = "inspect", conflicts_with = "output")]
    pub inspect: bool,
    /// Print the --inspect summary as JSON
    #[arg(long = "json", requires = "inspect")]
    pub json: bool,
}
