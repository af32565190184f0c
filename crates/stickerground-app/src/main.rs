//! Command-line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};
    use stickerground_app::{Shell, ShellResult};
    use stickerground_core::{BoardConfig, DirectoryDelivery, FileStorage, Point};

    #[derive(Parser)]
    #[command(name = "stickerground", version, about = "Edit Stickerground board files")]
    pub struct Cli {
        #[arg(help = "Board file to edit.", long, short, default_value = "stickerground.json")]
        board: PathBuf,

        #[arg(help = "JSON config file with board defaults.", long)]
        config: Option<PathBuf>,

        #[arg(help = "Board library directory (defaults to the user data dir).", long)]
        library: Option<PathBuf>,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        #[command(about = "Print the board settings and stickers")]
        Show,

        #[command(about = "Add a sticker")]
        Add {
            #[arg(help = "Sticker type, e.g. text or image.", long = "type", short = 't')]
            kind: String,
            #[arg(help = "Sticker content.")]
            content: String,
            #[arg(help = "Parse the content as JSON instead of plain text.", long, default_value_t = false)]
            json: bool,
            #[arg(long, allow_negative_numbers = true, requires = "y")]
            x: Option<f64>,
            #[arg(long, allow_negative_numbers = true, requires = "x")]
            y: Option<f64>,
            #[arg(help = "Display options as a JSON object.", long)]
            options: Option<String>,
        },

        #[command(name = "move", about = "Move a sticker to an absolute position")]
        Move {
            id: String,
            #[arg(allow_negative_numbers = true)]
            x: f64,
            #[arg(allow_negative_numbers = true)]
            y: f64,
        },

        #[command(about = "Pan the canvas by a relative offset")]
        Pan {
            #[arg(allow_negative_numbers = true)]
            dx: f64,
            #[arg(allow_negative_numbers = true)]
            dy: f64,
        },

        #[command(about = "Remove a sticker")]
        Remove { id: String },

        #[command(about = "Bring a sticker to the front")]
        Raise { id: String },

        #[command(about = "Set the background image and/or color")]
        Background {
            #[arg(long)]
            image: Option<String>,
            #[arg(long)]
            color: Option<String>,
        },

        #[command(about = "Export the board as stickerground.json")]
        Export {
            #[arg(help = "Directory to write the export into.", long, default_value = ".")]
            dir: PathBuf,
            #[cfg(feature = "dialog")]
            #[arg(help = "Ask where to save instead of using --dir.", long, default_value_t = false)]
            dialog: bool,
        },

        #[command(about = "Save the board into the library")]
        Save {
            #[arg(help = "Board name: letters, digits, '-' and '_'.")]
            name: String,
        },

        #[command(about = "Replace the board with one from the library")]
        Open { name: String },

        #[command(about = "List boards in the library")]
        List,
    }

    fn library(path: Option<PathBuf>) -> ShellResult<FileStorage> {
        Ok(match path {
            Some(path) => FileStorage::new(path)?,
            None => FileStorage::default_location()?,
        })
    }

    pub fn run(cli: Cli) -> ShellResult<()> {
        let config = match &cli.config {
            Some(path) => BoardConfig::from_file(path)?,
            None => BoardConfig::default(),
        };
        let mut shell = Shell::open(&cli.board, config)?;

        match cli.command {
            Commands::Show => {
                print!("{}", shell.summary());
                return Ok(());
            }
            Commands::Add { kind, content, json, x, y, options } => {
                let position = x.zip(y).map(|(x, y)| Point::new(x, y));
                let id = shell.add(&kind, &content, json, position, options.as_deref())?;
                println!("{}", id);
            }
            Commands::Move { id, x, y } => shell.move_sticker(&id, Point::new(x, y))?,
            Commands::Pan { dx, dy } => shell.pan(dx, dy),
            Commands::Remove { id } => shell.remove(&id)?,
            Commands::Raise { id } => shell.raise(&id)?,
            Commands::Background { image, color } => shell.set_background(image, color),
            Commands::Export {
                dir,
                #[cfg(feature = "dialog")]
                dialog,
            } => {
                #[cfg(feature = "dialog")]
                {
                    if dialog {
                        return shell.export(&mut stickerground_app::DialogDelivery);
                    }
                }
                return shell.export(&mut DirectoryDelivery::new(dir)?);
            }
            Commands::Save { name } => {
                return shell.save_to(&library(cli.library)?, &name);
            }
            Commands::Open { name } => shell.open_from(&library(cli.library)?, &name)?,
            Commands::List => {
                let storage = library(cli.library)?;
                for name in stickerground_core::BoardStorage::list(&storage)? {
                    println!("{}", name);
                }
                return Ok(());
            }
        }

        shell.save()
    }
}

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();

    if let Err(e) = cli::run(cli::Cli::parse()) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
