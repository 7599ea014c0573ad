use clap::{Parser, Subcommand};
use nas_config::config::{self, format, MAX_NAS_DEVICES};
use nas_config::editor::Editor;
use nas_config::error::{NasConfigError, Result};
use nas_config::notifications::Notifier;
use nas_config::service::ServiceController;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nas-config")]
#[command(about = "Edit the NAS monitor configuration", long_about = None)]
struct Cli {
    /// Config file to edit (default: ~/.config/nas-monitor/config.conf)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also report outcomes as desktop notifications
    #[arg(long, global = true)]
    notify: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all settings (default)
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the config file location
    Path,
    /// Print one setting
    Get { key: String },
    /// Change one setting and save
    Set { key: String, value: String },
    /// Manage NAS devices
    #[command(subcommand)]
    Device(DeviceCommand),
    /// Write the config file with current (or default) values
    Init,
    /// Restart nas-monitor.service
    Restart,
}

#[derive(Subcommand)]
enum DeviceCommand {
    /// List configured devices
    List,
    /// Add a device (host/share) and save
    Add { device: String },
    /// Remove a device by its number in `device list` and save
    Remove {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(config::default_config_path);
    let mut editor = Editor::open(path).with_notifier(Notifier::new(cli.notify));

    match cli.command.unwrap_or(Commands::Show { json: false }) {
        Commands::Show { json } => show(&editor, json),
        Commands::Path => {
            println!("{}", editor.path().display());
            Ok(())
        }
        Commands::Get { key } => match editor.get_field(&key) {
            Ok(value) => {
                println!("{value}");
                Ok(())
            }
            Err(e) => report(&editor, Err(e)),
        },
        Commands::Set { key, value } => {
            let outcome = editor.set_field(&key, &value);
            report(&editor, outcome)?;
            save(&mut editor)
        }
        Commands::Device(DeviceCommand::List) => {
            list_devices(&editor);
            Ok(())
        }
        Commands::Device(DeviceCommand::Add { device }) => {
            let outcome = editor.add_device(&device);
            report(&editor, outcome)?;
            save(&mut editor)
        }
        Commands::Device(DeviceCommand::Remove { number }) => {
            // `number` is at least 1, enforced by clap
            let index = usize::try_from(number - 1).unwrap_or(usize::MAX);
            let outcome = editor.remove_device(index).map(|_| ());
            report(&editor, outcome)?;
            save(&mut editor)
        }
        Commands::Init => {
            if editor.loaded_from_file() {
                tracing::info!("Rewriting existing config at {}", editor.path().display());
            }
            save(&mut editor)
        }
        Commands::Restart => {
            let ok = editor.restart_service(&ServiceController::default());
            println!("{}", editor.status());
            if ok {
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
    }
}

fn show(editor: &Editor, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(editor.settings())
            .map_err(|e| NasConfigError::Config(format!("Failed to serialize settings: {e}")))?;
        println!("{out}");
    } else {
        if !editor.loaded_from_file() {
            println!("# {} not found, showing defaults", editor.path().display());
        }
        let networks: Vec<&str> = editor.settings().home_network_names().collect();
        if networks.is_empty() {
            println!("# No home networks configured; every network counts as away");
        } else {
            println!("# Home networks: {}", networks.join(" | "));
        }
        print!("{}", format::render(editor.settings()));
    }
    Ok(())
}

fn list_devices(editor: &Editor) {
    let devices = &editor.settings().nas_devices;
    if devices.is_empty() {
        println!("No NAS devices configured");
        return;
    }
    for (i, device) in devices.iter().enumerate() {
        println!("{:>2}. {device}", i + 1);
    }
    println!("({}/{MAX_NAS_DEVICES} slots used)", devices.len());
}

fn save(editor: &mut Editor) -> Result<()> {
    let outcome = editor.save();
    report(editor, outcome)
}

/// Print the status line for a finished action
fn report(editor: &Editor, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => {
            println!("{}", editor.status());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
