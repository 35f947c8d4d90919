//! Terminal debate runner.
//!
//! Loads configuration from the environment, picks a topic, then reads one
//! argument per line from stdin. Commands: `/score`, `/history [won|lost]`, `/end`, `/quit`.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use debate_practice::adapters::{build_generator, build_store};
use debate_practice::application::{
    DebateSessionEngine, EndDebateCommand, EndDebateHandler, GetDebateHandler, GetDebateQuery,
    ListDebatesHandler, ListDebatesQuery, StartDebateCommand, StartDebateHandler,
    SubmitTurnCommand, SubmitTurnHandler, TopicChoice,
};
use debate_practice::config::{AppConfig, LoggingConfig};
use debate_practice::domain::debate::{catalog, Difficulty, Leader, OutcomeFilter, Scoreboard};
use debate_practice::domain::foundation::{SessionId, UserId};

const LOCAL_USER: &str = "local";

struct Handlers {
    start: StartDebateHandler,
    submit: SubmitTurnHandler,
    end: EndDebateHandler,
    get: GetDebateHandler,
    list: ListDebatesHandler,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let generator = build_generator(&config.generation)?;
    let store = build_store(&config.storage);
    let engine = Arc::new(DebateSessionEngine::new(generator));
    tracing::info!(backend = engine.backend_name(), "Debate engine ready");

    let handlers = Handlers {
        start: StartDebateHandler::new(engine.clone(), store.clone()),
        submit: SubmitTurnHandler::new(engine.clone(), store.clone()),
        end: EndDebateHandler::new(engine, store.clone()),
        get: GetDebateHandler::new(store.clone()),
        list: ListDebatesHandler::new(store),
    };
    let user_id = UserId::new(LOCAL_USER)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_topics();
    let Some(choice) = prompt(&mut lines, "Topic number, or 'custom: <proposition>': ").await? else {
        return Ok(());
    };

    let started = handlers
        .start
        .handle(StartDebateCommand {
            topic: parse_topic_choice(&choice),
            user_id: Some(user_id.clone()),
        })
        .await;
    let started = match started {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Could not start debate: {}", err);
            return Ok(());
        }
    };
    let session_id = *started.session.id();
    if started.degraded.is_some() {
        println!("(demo mode: the opponent is running on canned responses)");
    }
    println!("\nDebating: {}\n", started.session.topic().title());
    if let Some(opening) = started.session.turns().first() {
        println!("OPPONENT:\n{}\n", opening.text());
    }

    while let Some(line) = prompt(&mut lines, "YOU> ").await? {
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/score" => show_score(&handlers, session_id).await,
            command if command.starts_with("/history") => {
                let filter = command.trim_start_matches("/history");
                show_history(&handlers, &user_id, filter).await
            }
            "/end" => {
                match handlers.end.handle(EndDebateCommand { session_id }).await {
                    Ok(result) => {
                        println!("\n{}\n", result.analysis());
                        print_scoreboard(&result.scoreboard);
                        break;
                    }
                    Err(err) => println!("{}", err),
                }
            }
            text => {
                match handlers
                    .submit
                    .handle(SubmitTurnCommand::new(session_id, text))
                    .await
                {
                    Ok(result) => {
                        if let Some(reply) = result.session.turns().last() {
                            println!("\nOPPONENT:\n{}\n", reply.text());
                        }
                        println!(
                            "Round {}: you {:.1}, opponent {:.1}\n",
                            result.session.round_count(),
                            result.user_score,
                            result.opponent_score
                        );
                    }
                    Err(err) => println!("{}", err),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    label: &str,
) -> Result<Option<String>, Box<dyn Error>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?)
}

fn print_topics() {
    println!("Available topics:");
    for topic in catalog() {
        println!(
            "  {}. {} [{}, {}]",
            topic.id(),
            topic.title(),
            topic.category(),
            topic.difficulty()
        );
    }
}

fn parse_topic_choice(input: &str) -> TopicChoice {
    match input.trim().strip_prefix("custom:") {
        Some(title) => TopicChoice::Custom {
            title: title.trim().to_string(),
            description: String::new(),
            difficulty: Difficulty::default(),
            category: String::new(),
        },
        None => TopicChoice::Catalog(input.trim().to_string()),
    }
}

async fn show_score(handlers: &Handlers, session_id: SessionId) {
    match handlers.get.handle(GetDebateQuery { session_id }).await {
        Ok(view) => print_scoreboard(&view.scoreboard),
        Err(err) => println!("{}", err),
    }
}

async fn show_history(handlers: &Handlers, user_id: &UserId, filter: &str) {
    let filter: OutcomeFilter = match filter.parse() {
        Ok(filter) => filter,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    let query = ListDebatesQuery::new(user_id.clone()).with_filter(filter);
    match handlers.list.handle(query).await {
        Ok(history) => {
            for summary in &history.debates {
                let result = summary.result.map_or("in progress", |r| r.as_str());
                println!(
                    "  {} | {} [{}, {}] | {} round(s) | {:.1} - {:.1} | {}",
                    summary.session_id,
                    summary.topic_title,
                    summary.category,
                    summary.difficulty,
                    summary.rounds,
                    summary.user_score,
                    summary.opponent_score,
                    result
                );
            }
            let stats = &history.stats;
            println!(
                "Completed: {} | win rate {}% | avg score {:.1} | {} round(s) total | longest {} | favorite: {}",
                stats.total_debates,
                stats.win_rate,
                stats.avg_score,
                stats.total_rounds,
                stats.longest_debate,
                stats.favorite_category.as_deref().unwrap_or("-")
            );
        }
        Err(err) => println!("{}", err),
    }
}

fn print_scoreboard(board: &Scoreboard) {
    let leader = match board.leader {
        Leader::User => "you",
        Leader::Opponent => "opponent",
        Leader::Tie => "nobody",
    };
    println!(
        "Score after {} round(s): you {:.1}, opponent {:.1} ({:.1}% of points, {} leads)",
        board.rounds, board.user_score, board.opponent_score, board.user_share_percent, leader
    );
}
