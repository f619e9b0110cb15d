use clap::{Args, Subcommand};

mod register;

#[derive(Debug, Args)]
pub(crate) struct WebhookCommand {
    #[command(subcommand)]
    command: WebhookSubcommand,
}

#[derive(Debug, Subcommand)]
enum WebhookSubcommand {
    /// Subscribe this service to cart update notifications
    Register(register::RegisterWebhookArgs),
}

pub(crate) async fn run(command: WebhookCommand) -> Result<(), String> {
    match command.command {
        WebhookSubcommand::Register(args) => register::run(args).await,
    }
}
