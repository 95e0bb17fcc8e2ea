use chrono::{DateTime, Utc};
use clap::Parser;
use formwire::adapters::{MemoryPage, ReqwestTransport, ScriptedDialog, TerminalDialog};
use formwire::config::{CliConfig, Command};
use formwire::domain::model::DomEvent;
use formwire::domain::ports::{ConfirmDialog, CookieStore, Document};
use formwire::utils::logger;
use formwire::{
    clear_and_redirect, datetime_input_value, local_datetime_input_value, num_from_string,
    ClickOutcome, DeleteBinding, FormBinding, FormwireError, SubmitOutcome,
};
use std::sync::Arc;

const DELETE_BUTTON_ID: &str = "delete";
const FORM_ID: &str = "form";

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }
}

async fn run(cli: CliConfig) -> formwire::Result<()> {
    match &cli.command {
        Command::ParseInt { value } => {
            println!("{}", num_from_string(value));
        }

        Command::DatetimeValue { at } => {
            let value = match at {
                Some(raw) => {
                    let at = DateTime::parse_from_rfc3339(raw).map_err(|e| {
                        FormwireError::InvalidConfigValueError {
                            field: "at".to_string(),
                            value: raw.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    datetime_input_value(at.with_timezone(&Utc), *at.offset())
                }
                None => local_datetime_input_value(Utc::now()),
            };
            println!("{}", value);
        }

        Command::Delete { url, yes } => {
            let config = cli.client_config()?;
            let transport = Arc::new(ReqwestTransport::new(&config)?);
            let dialog: Arc<dyn ConfirmDialog> = if *yes {
                Arc::new(ScriptedDialog::always(true))
            } else {
                Arc::new(TerminalDialog)
            };

            let page = MemoryPage::new().with_button(DELETE_BUTTON_ID);
            let binding = DeleteBinding::bind(&page, DELETE_BUTTON_ID, url, transport, dialog)?
                .with_confirm_message(config.confirm_message.clone());

            match binding.click(&mut DomEvent::click())? {
                ClickOutcome::Declined => println!("Cancelled, nothing sent"),
                ClickOutcome::Dispatched(pending) => {
                    let response = pending.wait().await?;
                    println!("✅ DELETE {} -> {}", url, response.status);
                    println!("{}", response.body);
                }
            }
        }

        Command::Submit {
            url,
            fields,
            enctype,
        } => {
            let config = cli.client_config()?;
            let transport = Arc::new(ReqwestTransport::new(&config)?);

            let pairs: Vec<(&str, &str)> = fields
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            let page: Arc<dyn Document> =
                Arc::new(MemoryPage::new().with_form(FORM_ID, enctype.as_deref(), &pairs));
            let binding = FormBinding::bind(page, FORM_ID, url, transport)?;

            match binding.submit(&mut DomEvent::submit())? {
                SubmitOutcome::Aborted => println!("Submission aborted"),
                SubmitOutcome::Dispatched(pending) => {
                    let response = pending.wait().await?;
                    println!("✅ POST {} -> {}", url, response.status);
                    println!("{}", response.body);
                }
            }
        }

        Command::ClearCookies { location, cookies } => {
            let page = MemoryPage::new().with_cookies(cookies);
            let cleared = clear_and_redirect(&page, &page, location);

            println!("🍪 Cleared: {}", cleared.join(", "));
            println!("Remaining: {:?}", page.cookie_header());
            if let Some(location) = page.location() {
                println!("➡️  Navigated to {}", location);
            }
        }
    }

    Ok(())
}
