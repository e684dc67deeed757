use std::path::PathBuf;

use anyhow::Context;
use askama::Template;
use chrono::Utc;
use clap::{Parser, Subcommand};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::json;

use fakeso::config::ClientConfig;
use fakeso::models::{
    FontType, LineSpacingType, Question, SettingsInfo, TextBoldnessType, TextSizeType, ThemeType,
    User,
};
use fakeso::services::{SettingChange, UserAuthService};
use fakeso::socket::decode_frame;
use fakeso::telemetry::{init_tracing, render_metrics};
use fakeso::views::answer_page::page_title;
use fakeso::views::{AnswerPageState, Page, SideBarNav};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with server_url, request_timeout_secs and user_agent
    #[clap(long)]
    config: Option<PathBuf>,
    /// Print request counters to stderr when done
    #[clap(long)]
    print_metrics: bool,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send an email verification to a new user
    VerifyEmail {
        username: String,
        #[clap(long)]
        email: String,
        #[clap(long, env = "FAKESO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create the user behind a verification token
    AddUser {
        #[clap(long, env = "FAKESO_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Log in and print the issued token
    Login {
        username: String,
        #[clap(long, env = "FAKESO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Email a password reset link
    SendPasswordReset { username: String },
    /// Set a new password using a reset token
    ResetPassword {
        #[clap(long, env = "FAKESO_TOKEN", hide_env_values = true)]
        token: String,
        #[clap(long, env = "FAKESO_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Change one display setting of a user
    Settings {
        username: String,
        #[clap(subcommand)]
        setting: SettingArg,
    },
    /// Finish Google sign-in with the code from the consent screen
    GoogleAuth { code: String },
    /// Render a question page from a JSON file
    RenderQuestion {
        path: PathBuf,
        /// Username of the viewer, used for the vote widget
        #[clap(long, default_value = "guest")]
        viewer: String,
        /// JSON file with the viewer's settings
        #[clap(long)]
        settings: Option<PathBuf>,
        #[clap(long)]
        show_ai_answer: bool,
        #[clap(long, default_value = "/home")]
        active_path: String,
        /// socket.io frames to apply before rendering
        #[clap(long = "event")]
        events: Vec<String>,
    },
    /// Decode a socket.io frame into an event
    DecodeEvent { frame: String },
}

#[derive(Subcommand)]
enum SettingArg {
    Theme { value: ThemeType },
    BackgroundColor { value: String },
    TextColor { value: String },
    ButtonColor { value: String },
    TextSize { value: TextSizeType },
    TextBoldness { value: TextBoldnessType },
    Font { value: FontType },
    LineSpacing { value: LineSpacingType },
}

impl From<SettingArg> for SettingChange {
    fn from(arg: SettingArg) -> Self {
        match arg {
            SettingArg::Theme { value } => Self::Theme(value),
            SettingArg::BackgroundColor { value } => Self::BackgroundColor(value),
            SettingArg::TextColor { value } => Self::TextColor(value),
            SettingArg::ButtonColor { value } => Self::ButtonColor(value),
            SettingArg::TextSize { value } => Self::TextSize(value),
            SettingArg::TextBoldness { value } => Self::TextBoldness(value),
            SettingArg::Font { value } => Self::Font(value),
            SettingArg::LineSpacing { value } => Self::LineSpacing(value),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config =
        ClientConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let result = run(cli.command, &config).await;
    if cli.print_metrics {
        eprint!("{}", render_metrics()?);
    }
    result
}

async fn run(command: Commands, config: &ClientConfig) -> anyhow::Result<()> {
    match command {
        Commands::VerifyEmail {
            username,
            email,
            password,
        } => {
            let user = User {
                email: Some(email),
                password: Some(password),
                ..User::named(username)
            };
            print_json(&service(config)?.send_email_verification(&user).await?)
        }
        Commands::AddUser { token } => {
            let token = SecretString::from(token);
            print_json(&service(config)?.add_user(&token).await?)
        }
        Commands::Login { username, password } => {
            let password = SecretString::from(password);
            print_json(&service(config)?.login_user(&username, &password).await?)
        }
        Commands::SendPasswordReset { username } => {
            print_json(&service(config)?.send_password_reset(&username).await?)
        }
        Commands::ResetPassword {
            token,
            new_password,
        } => {
            let token = SecretString::from(token);
            let new_password = SecretString::from(new_password);
            print_json(&service(config)?.reset_password(&token, &new_password).await?)
        }
        Commands::Settings { username, setting } => {
            let change = SettingChange::from(setting);
            print_json(&service(config)?.change_setting(&username, &change).await?)
        }
        Commands::GoogleAuth { code } => {
            print_json(&service(config)?.authenticate_with_google(&code).await?)
        }
        Commands::RenderQuestion {
            path,
            viewer,
            settings,
            show_ai_answer,
            active_path,
            events,
        } => {
            let question: Question = read_json(&path)?;
            let viewer = User {
                settings: settings
                    .map(|path| read_json::<SettingsInfo>(&path))
                    .transpose()?,
                ..User::named(viewer)
            };
            let mut state = AnswerPageState::with_question(question);
            for frame in &events {
                if let Some(event) = decode_frame(frame).context("Failed to decode event")? {
                    state.apply(&event);
                }
            }
            if show_ai_answer {
                state.toggle_ai_answer();
            }
            let body = state.render(&viewer, Utc::now())?.unwrap_or_default();
            let nav = SideBarNav::new(&active_path).render()?;
            let page = Page::new(page_title(&state), viewer.settings.as_ref(), nav, body);
            println!("{}", page.render()?);
            Ok(())
        }
        Commands::DecodeEvent { frame } => match decode_frame(&frame)? {
            Some(event) => print_json(&json!({
                "event": event.name(),
                "payload": event.payload()?,
            })),
            None => print_json(&json!({ "event": null })),
        },
    }
}

fn service(config: &ClientConfig) -> anyhow::Result<UserAuthService> {
    UserAuthService::from_config(config).context("Failed to build HTTP client")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
