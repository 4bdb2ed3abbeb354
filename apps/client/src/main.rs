use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use client::config::Config;
use client::forms::auth::{LoginForm, LOGIN_FAILED};
use client::listing::{CandidateApplications, RecruiterOverview};
use client::models::auth::Destination;
use client::state::ClientState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Algohire client v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "API base {} (timeout {}s, search debounce {}ms)",
        config.api_base_url, config.request_timeout_secs, config.search_debounce_ms
    );

    let state = ClientState::connect(config.clone())?;

    // Public listing works without a session
    let jobs = state.api.list_jobs().await?;
    let search = state.job_search(jobs);
    info!(
        "{} job(s) listed across {} page(s)",
        search.matches().len(),
        search.total_pages()
    );
    for job in search.page_items() {
        info!(
            "  [{}] {} at {} ({}) posted {}",
            job.job_id,
            job.title,
            job.company,
            job.location,
            job.posted_on().unwrap_or_else(|| "-".into())
        );
    }

    let (Some(email), Some(password)) = (&config.login_email, &config.login_password) else {
        info!("No credentials configured; skipping signed-in views");
        return Ok(());
    };

    let mut login = LoginForm::new();
    login.set("email", email);
    login.set("password", password);
    let destination = match login.submit(state.api.as_ref(), &state.session).await {
        Ok(destination) => destination,
        Err(e) => {
            let notice = e.notice("Login Error", LOGIN_FAILED);
            warn!("{}: {}", notice.title, notice.description);
            return Ok(());
        }
    };

    match destination {
        Destination::Dashboard => {
            let profile = state.api.fetch_profile().await?;
            let mine = CandidateApplications::load(state.api.as_ref()).await?;
            info!(
                "Signed in as {} with {} application(s), {} pending",
                profile.user_name.as_deref().unwrap_or("candidate"),
                mine.total(),
                mine.pending()
            );
        }
        Destination::RecruiterDashboard => {
            let overview = RecruiterOverview::load(state.api.as_ref()).await?;
            info!(
                "Recruiter dashboard: {} job(s) posted ({} active), {} application(s), {} shortlisted",
                overview.stats.jobs_posted,
                overview.active_jobs(),
                overview.stats.applications,
                overview.stats.shortlisted
            );
        }
        Destination::Login => warn!("Signed in with an unrecognised role; nothing to show"),
    }

    Ok(())
}
