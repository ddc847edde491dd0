//! Polls management entry point.

mod cli;

use std::fmt::Display;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use polls_common::{Config, config::LoggingConfig};
use polls_core::{
    ChoiceService, CreateChoiceInput, CreateQuestionInput, DbPermissionRegistry, HistoryService,
    PermissionService, QuestionService, UpdatePermissionsCommand,
};
use polls_db::repositories::{
    ChoiceRepository, ContentTypeRepository, PermissionRepository, QuestionHistoryRepository,
    QuestionRepository,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Print one record, as JSON or through its `Display` form.
fn emit<T: Serialize + Display>(value: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Services wired over one connection pool.
struct App {
    questions: QuestionService,
    choices: ChoiceService,
    history: HistoryService,
    permissions: PermissionService,
}

impl App {
    fn new(db: Arc<DatabaseConnection>) -> Self {
        let question_repo = QuestionRepository::new(Arc::clone(&db));
        let history = HistoryService::new(QuestionHistoryRepository::new(Arc::clone(&db)));
        let registry = DbPermissionRegistry::new(
            ContentTypeRepository::new(Arc::clone(&db)),
            PermissionRepository::new(Arc::clone(&db)),
        );

        Self {
            questions: QuestionService::new(question_repo.clone(), history.clone()),
            choices: ChoiceService::new(ChoiceRepository::new(db), question_repo),
            history,
            permissions: PermissionService::new(Arc::new(registry)),
        }
    }

    async fn run(&self, command: Command, json: bool) -> anyhow::Result<()> {
        match command {
            Command::Migrate => {}
            Command::UpdatePermissions => {
                let report = UpdatePermissionsCommand::new(self.permissions.clone())
                    .run()
                    .await?;
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    for codename in &report.permissions_created {
                        println!("created {codename}");
                    }
                    println!(
                        "{} content types, {} permissions created",
                        report.content_types_created.len(),
                        report.permissions_created.len()
                    );
                }
            }
            Command::CreateQuestion { text, pub_date } => {
                let question = self
                    .questions
                    .create(CreateQuestionInput {
                        question_text: text,
                        pub_date: pub_date.unwrap_or_else(Utc::now),
                    })
                    .await?;
                if json {
                    emit(&question, true)?;
                } else {
                    println!("{} {question}", question.id);
                }
            }
            Command::AddChoice { question, text } => {
                let choice = self
                    .choices
                    .create(CreateChoiceInput {
                        question_id: question,
                        choice_text: text,
                        votes: 0,
                    })
                    .await?;
                if json {
                    emit(&choice, true)?;
                } else {
                    println!("{} {choice}", choice.id);
                }
            }
            Command::Vote { choice } => {
                let choice = self.choices.vote(&choice).await?;
                if json {
                    emit(&choice, true)?;
                } else {
                    println!("{choice}: {} votes", choice.votes);
                }
            }
            Command::DeleteQuestion { id } => {
                self.questions.delete(&id).await?;
                if !json {
                    println!("deleted {id}");
                }
            }
            Command::History { limit } => {
                for row in self.history.list(limit).await? {
                    emit(&row, json)?;
                }
            }
            Command::Recent { limit } => {
                let now = Utc::now();
                for question in self.questions.list_recent(limit).await? {
                    if json {
                        emit(&question, true)?;
                    } else {
                        let marker = if question.was_published_recently(now) {
                            "*"
                        } else {
                            " "
                        };
                        println!("{marker} {} {question}", question.id);
                    }
                }
            }
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    init_tracing(&config.logging);

    let db = polls_db::init(&config)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    polls_db::migrate(&db).await?;
    info!("Migrations completed");

    App::new(Arc::new(db)).run(cli.command, cli.json).await
}
