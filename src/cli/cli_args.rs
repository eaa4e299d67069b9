use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Physics demonstrations: harmonic oscillator, world population, funnel drainage
#[derive(Parser, Debug)]
#[command(name = "physdemos", version)]
#[command(about = "Physics demonstrations: harmonic oscillator, world population, funnel drainage")]
#[command(long_about = "Without a subcommand an interactive menu is started.")]
pub struct Args {
    /// JSON configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve the harmonic oscillator for several springs and masses and plot x(t)
    Oscillator {
        /// Output picture (png, bmp, jpg or svg)
        #[arg(short, long, default_value = "harmonic_oscillator.png")]
        output: PathBuf,
        /// Also write the solutions to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Open the picture when done
        #[arg(long)]
        show: bool,
    },
    /// Plot the world population with a linear and a logarithmic axis
    Population {
        /// CSV table with the columns "year" and "world population", e.g. data/worlddata.csv
        input: PathBuf,
        /// Output picture (png, bmp, jpg or svg; pdf is not supported by the plotting backend)
        output: PathBuf,
        /// Open the picture when done
        #[arg(long)]
        show: bool,
    },
    /// Animate funnels of different shapes draining
    Funnel {
        /// Output animation (gif)
        movie: PathBuf,
        /// Additionally write every frame as png into this directory
        #[arg(long)]
        frames_dir: Option<PathBuf>,
        /// Comma separated shapes, e.g. cone,half-sphere,cylinder,sphere-normalised,monomial:2
        #[arg(long)]
        shapes: Option<String>,
        /// Open the animation when done
        #[arg(long)]
        show: bool,
    },
    /// Print the active configuration
    Config {
        /// Write the active configuration as JSON to this file
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_needs_two_paths() {
        assert!(Args::try_parse_from(["physdemos", "population", "in.csv"]).is_err());
        let args = Args::try_parse_from(["physdemos", "population", "in.csv", "out.png"]).unwrap();
        match args.command {
            Some(Command::Population { input, output, show }) => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(output, PathBuf::from("out.png"));
                assert!(!show);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_funnel_needs_movie() {
        assert!(Args::try_parse_from(["physdemos", "funnel"]).is_err());
        let args = Args::try_parse_from([
            "physdemos",
            "funnel",
            "drain.gif",
            "--shapes",
            "cone,cylinder",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(matches!(
            args.command,
            Some(Command::Funnel { shapes: Some(ref s), .. }) if s == "cone,cylinder"
        ));
    }

    #[test]
    fn test_population_help_mentions_pdf() {
        use clap::CommandFactory;
        let mut command = Args::command();
        let population = command.find_subcommand_mut("population").unwrap();
        let help = population.render_long_help().to_string();
        assert!(help.contains("pdf is not supported"));
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["physdemos", "oscillator"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Oscillator { ref output, csv: None, show: false })
                if output == &PathBuf::from("harmonic_oscillator.png")
        ));
        let args = Args::try_parse_from(["physdemos"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }
}
