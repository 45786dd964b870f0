use clap::{Parser, Subcommand};
use marker_mill::{config, convert, manifest, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marker-mill")]
#[command(about = "Converts a map content manifest into a deployable marker asset tree")]
#[command(long_about = "\
Converts a map content manifest into a deployable marker asset tree

material/material.json describes every marker once; this tool expands it into
per-marker directories under the web root plus a consolidated markers.json the
map viewer loads.

Project layout:

  material/
  ├── material.json                # Manifest: groups + marker entries
  ├── config.toml                  # Thumbnail settings (optional)
  └── town-hall/
      ├── photo.jpg                # Referenced by `thumb`
      └── 1900.png                 # Referenced by `copy`

  content/                         # Web root, served as-is
  ├── markers.json                 # Generated index
  └── markers/                     # Output root (must exist)
      └── town-hall/
          ├── thumb.jpg            # Downscaled thumbnail
          ├── article.html         # Synthesized from `simpleArticle`
          └── 1900.png             # Staged copy

Per marker, the manifest may provide:
  thumb            source image, downscaled into thumb.jpg
  copy             [{from, to}] files staged into the marker directory
  simpleArticle    {text} written as article.html + index descriptor
  article          literal descriptor, passed through verbatim
  simpleImage      filename expanded to a {type: image} descriptor
  imageComparison  [back, front] expanded to a {type: imageComparison} descriptor
  media            literal descriptor, passed through verbatim

Run 'marker-mill gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Input root: material.json plus all source files
    #[arg(long, default_value = "material", global = true)]
    input: PathBuf,

    /// Web root that receives markers.json
    #[arg(long, default_value = "content", global = true)]
    web_root: PathBuf,

    /// Directory under the web root that receives marker directories
    #[arg(long, default_value = "markers", global = true)]
    markers_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the manifest into marker directories and markers.json
    Convert {
        /// Delete and recreate the output root before converting
        #[arg(long)]
        clean: bool,
    },
    /// Validate the manifest without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let paths = convert::ConvertPaths::new(&cli.input, &cli.web_root, cli.markers_dir.as_str());

    match cli.command {
        Command::Convert { clean } => {
            let config = config::load_config(&cli.input)?;

            if clean {
                println!("==> Cleaning {}", paths.output_root().display());
                convert::clean_output_root(&paths.output_root())?;
            }

            println!("==> Converting {}", paths.manifest_path().display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_convert_event(&event);
                }
            });
            let report = convert::convert(&paths, &config, Some(tx))?;
            printer.join().unwrap();
            output::print_convert_summary(&report, &paths.index_path());
        }
        Command::Check => {
            println!("==> Checking {}", paths.manifest_path().display());
            let manifest = manifest::load(&paths.manifest_path())?;
            let report = convert::check_manifest(&manifest, &paths)?;
            output::print_check_output(&report);
            if !report.sources_ok() {
                return Err("missing source files".into());
            }
            println!("==> Manifest is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
