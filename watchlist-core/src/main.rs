use std::env;

use watchlist_core::{
    build_app_state,
    domain::UserIdentity,
    services::SaveMode,
    utils::{init_tracing, Settings},
    view_models::SavedMoviesList,
};

const USER_ID_ENV_VAR: &str = "WATCHLIST_USER_ID";

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::from_env()?;
    let user_id = env::var(USER_ID_ENV_VAR)
        .map_err(|_| color_eyre::eyre::eyre!("{} must be set.", USER_ID_ENV_VAR))?;

    let app_state = build_app_state(&settings, SaveMode::KeyedByMovie)
        .with_identity(UserIdentity::new(&user_id, "", ""));

    let saved = SavedMoviesList::new(&app_state);
    saved.refresh().await;

    let records = saved.records().await;
    tracing::info!(count = records.len(), user_id = %user_id, "Loaded saved movies");
    for record in records {
        match record.snapshot {
            Some(snapshot) => println!(
                "{}\t{} ({})\t{:.1}/10",
                record.movie_id, snapshot.title, snapshot.release_date, snapshot.vote_average
            ),
            None => println!("{}\t<no snapshot>", record.movie_id),
        }
    }

    Ok(())
}
