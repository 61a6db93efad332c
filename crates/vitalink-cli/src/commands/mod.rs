//! Command handlers, one module per API area.

mod account;
mod emergency;
mod export;
mod misc;
mod profile;
mod records;
mod share;

use anyhow::Result;

use crate::app::App;
use crate::cli::Commands;

pub async fn run(app: &App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email } => account::login(app, email).await,
        Commands::Register { name, email } => account::register(app, name, email).await,
        Commands::Logout => account::logout(app).await,
        Commands::Whoami => account::whoami(app).await,
        Commands::Profile(cmd) => profile::handle(app, cmd).await,
        Commands::Documents(cmd) => records::handle_documents(app, cmd).await,
        Commands::Records(cmd) => records::handle_records(app, cmd).await,
        Commands::Sos(args) => emergency::sos(app, args).await,
        Commands::Emergency(cmd) => emergency::handle(app, cmd).await,
        Commands::Export { format, out } => export::export(app, format, out).await,
        Commands::Share(cmd) => share::handle(app, cmd).await,
        Commands::Dashboard => misc::dashboard(app).await,
        Commands::Config => misc::show_config(app),
        Commands::ImageCheck { url } => misc::image_check(app, &url),
    }
}
