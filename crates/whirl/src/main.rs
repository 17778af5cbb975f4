use clap::Parser;
use relm4::prelude::*;
use whirl::config;
use whirl::events::AppEvent;
use whirl::gui::app::AppModel;
use whirl::sys::runtime;

#[derive(Parser, Debug)]
#[command(name = "whirl", version, about, long_about = None)]
struct Args {
    /// Start animating as soon as the window is up
    #[arg(short, long)]
    start: bool,

    /// Write the default config file if it is missing, print its path and exit
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let options = config::load_or_default();
    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone());

    if args.start && tx.try_send(AppEvent::Start).is_err() {
        log::warn!("Could not queue start request");
    }

    // GTK would reject our own flags, so it gets no arguments.
    let app = RelmApp::new("org.whirl.indicator").with_args(Vec::new());

    app.run::<AppModel>((options, rx));
    Ok(())
}
