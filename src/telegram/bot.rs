//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command registration in the Telegram UI

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Puedo ayudarte con:")]
pub enum Command {
    #[command(description = "mensaje de bienvenida")]
    Start,
    #[command(description = "registrar un documento de pago")]
    Documento,
    #[command(description = "cancelar el registro en curso")]
    Cancelar,
    #[command(description = "estado del bot y del entorno")]
    Estado,
    #[command(description = "lista de comandos")]
    Ayuda,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, missing token)
pub fn create_bot() -> anyhow::Result<Bot> {
    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        Bot::from_env_with_client(ClientBuilder::new().timeout(config::network::timeout()).build()?).set_api_url(url)
    } else {
        Bot::from_env_with_client(ClientBuilder::new().timeout(config::network::timeout()).build()?)
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "mensaje de bienvenida"),
        BotCommand::new("documento", "registrar un documento de pago"),
        BotCommand::new("cancelar", "cancelar el registro en curso"),
        BotCommand::new("estado", "estado del bot y del entorno"),
        BotCommand::new("ayuda", "lista de comandos"),
    ])
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);

        assert!(command_list.contains("Puedo ayudarte"));
        assert!(command_list.contains("documento"));
        assert!(command_list.contains("cancelar"));
        assert!(command_list.contains("estado"));
    }
}
