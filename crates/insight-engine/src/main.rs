use clap::{value_parser, Arg, ArgAction, Command};
use insight_engine::prelude::*;
use insight_engine::CannedGenerationClient;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Command::new("insight-engine")
        .version(insight_engine::VERSION)
        .about("Brief lifecycle & review coordination engine")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Run a full request → brief → review → share lifecycle")
                .arg(
                    Arg::new("plan")
                        .long("plan")
                        .default_value("pro")
                        .help("Plan to provision the demo account with (free|pro|enterprise)"),
                )
                .arg(
                    Arg::new("human")
                        .long("human")
                        .action(ArgAction::SetTrue)
                        .help("Request the ai-plus-human mode and walk the review queue"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .default_value("60")
                        .value_parser(value_parser!(u64))
                        .help("Generation timeout in seconds"),
                ),
        )
        .subcommand(Command::new("plans").about("Print the stock plan catalog"));

    match cli.get_matches().subcommand() {
        Some(("demo", args)) => {
            let plan_id = args.get_one::<String>("plan").unwrap();
            let plan = Plan::by_id(plan_id)
                .ok_or_else(|| anyhow::anyhow!("unknown plan: {plan_id}"))?;
            let human = args.get_flag("human");
            let timeout = *args.get_one::<u64>("timeout").unwrap();

            run_demo(plan, human, timeout).await
        }
        Some(("plans", _)) => {
            for plan in &Plan::CATALOG {
                println!(
                    "{:<12} ${:<4} {} AI credits, {} human-insight credits",
                    plan.name, plan.price, plan.ai_credits, plan.human_insight_credits
                );
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn run_demo(plan: &Plan, human: bool, timeout_secs: u64) -> anyhow::Result<()> {
    let config = EngineConfig::new().with_generation_timeout_secs(timeout_secs);
    let engine = LifecycleCoordinator::new(config, Arc::new(CannedGenerationClient::new()));

    let account = AccountId::new();
    engine.open_account(account, plan);
    let session = Session::authenticated(account);

    let mode = if human {
        InsightMode::AiPlusHuman
    } else {
        InsightMode::AiOnly
    };
    let payload = RequestPayload::new("Q3 Expansion", "Should we enter the DACH market?")
        .with_context("Series B SaaS, currently US-only")
        .with_subquestion("What is the regulatory burden?")
        .with_subquestion("Who are the entrenched competitors?")
        .with_mode(mode);

    let request = engine.submit_request(&session, payload).await?;
    println!("request {} -> {}", request.id, request.status);

    let brief = engine.get_brief_by_request(&session, request.id)?;
    println!("brief   {} -> {} ({} sections)", brief.id, brief.status, brief.sections.len());

    if human {
        let analyst = AnalystSession::authenticated("analyst-1");
        let jobs = engine.list_review_jobs(&analyst, Some(JobStatus::Pending))?;
        let job = jobs
            .first()
            .ok_or_else(|| anyhow::anyhow!("no pending review job"))?;
        engine.start_review(&analyst, job.id)?;
        println!("job     {} -> in-progress", job.id);

        let drafts: Vec<SectionDraft> = SectionKey::CANONICAL
            .iter()
            .map(|&key| SectionDraft::new(key, format!("Analyst take on {}", key.title())))
            .collect();
        let brief = engine.submit_insight(&analyst, brief.id, drafts)?;
        println!("brief   {} -> {} (overlay attached)", brief.id, brief.status);
    }

    let shared = engine.toggle_share(&session, brief.id, true)?;
    let slug = shared.share_slug.as_ref().expect("slug minted on first share");
    println!("shared  {} -> /p/{}", shared.id, slug);

    let public = engine.get_public_brief_by_slug(slug.as_str())?;
    println!("{}", serde_json::to_string_pretty(&public)?);

    let balance = engine.ledger().balance(account);
    println!(
        "credits remaining: {} AI, {} human-insight",
        balance.ai_credits, balance.human_insight_credits
    );
    Ok(())
}
