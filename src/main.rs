use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// crank - packaging recipe build driver
///
/// Load a packaging recipe and drive the delegated build tool through its
/// configure, build, and install phases.
///
/// The build inherits its settings from the ambient environment (CC,
/// CRANK_BUILD_TYPE); the recipe declares which axes it is sensitive to.
///
/// Examples:
///   crank build     # Run the packaging build for ./recipe.json
#[derive(Parser, Debug)]
#[command(author, version = env!("CRANK_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Recipe manifest path (defaults to ./recipe.json; also via CRANK_RECIPE)
    #[arg(
        long = "recipe",
        short = 'f',
        env = "CRANK_RECIPE",
        value_name = "PATH",
        global = true
    )]
    pub recipe: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the packaging build (configure, build, install)
    Build,

    /// Show the metadata declared by the recipe
    Show,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = crank::runtime::RealRuntime;

    match cli.command {
        Commands::Build => crank::commands::build(runtime, cli.recipe)?,
        Commands::Show => crank::commands::show(runtime, cli.recipe)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_build_parsing() {
        let cli = Cli::try_parse_from(["crank", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build));
        assert_eq!(cli.recipe, None);
    }

    #[test]
    fn test_cli_show_parsing() {
        let cli = Cli::try_parse_from(["crank", "show"]).unwrap();
        assert!(matches!(cli.command, Commands::Show));
    }

    #[test]
    fn test_cli_recipe_flag_parsing() {
        let cli =
            Cli::try_parse_from(["crank", "build", "--recipe", "/tmp/recipe.json"]).unwrap();
        assert_eq!(cli.recipe, Some(PathBuf::from("/tmp/recipe.json")));
    }

    #[test]
    fn test_cli_global_recipe_parsing() {
        let cli = Cli::try_parse_from(["crank", "-f", "/tmp/recipe.json", "show"]).unwrap();
        assert_eq!(cli.recipe, Some(PathBuf::from("/tmp/recipe.json")));
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["crank"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_build_takes_no_positional_args() {
        let result = Cli::try_parse_from(["crank", "build", "extra"]);
        assert!(result.is_err());
    }
}
