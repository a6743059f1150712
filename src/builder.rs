use crate::backend::{CalculationService, SchoolDirectory, SchoolInfoProvider};
use crate::errors::{AppError, FetchError, FetchTarget};
use crate::models::{AnswerCard, SchoolId};
use crate::session::Session;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// The session lock is never held across a backend call.

pub async fn load_schools<B: SchoolDirectory>(
    session: &Mutex<Session>,
    backend: &B,
) -> Result<(), FetchError> {
    if session.lock().await.schools_loaded() {
        return Ok(());
    }
    let schools = backend.fetch_all().await.inspect_err(|err| warn!("{err}"))?;
    session.lock().await.set_schools(schools);
    Ok(())
}

/// Returns whether the fetched info was applied; false means a newer choice
/// won the race.
pub async fn choose_school<B>(
    session: &Mutex<Session>,
    backend: &B,
    school_id: SchoolId,
) -> Result<bool, AppError>
where
    B: SchoolDirectory + SchoolInfoProvider,
{
    load_schools(session, backend).await?;
    let ticket = session.lock().await.select_school(school_id)?;
    info!(school_id, "school selected");

    let school_info = match backend.fetch_info(school_id).await {
        Ok(school_info) => school_info,
        Err(err) => {
            if !session.lock().await.school_ticket_current(&ticket) {
                debug!(school_id, "dropping failure for superseded school choice: {err}");
                return Ok(false);
            }
            warn!("{err}");
            return Err(err.into());
        }
    };
    Ok(session.lock().await.apply_school_info(ticket, &school_info))
}

/// Runs the committed question. `None` means a newer calculation superseded
/// this one and its answers were dropped.
pub async fn calculate<B: CalculationService>(
    session: &Mutex<Session>,
    backend: &B,
) -> Result<Option<AnswerCard>, AppError> {
    let ticket = session.lock().await.begin_calculation()?;
    let expected = ticket.request.stats.len();

    let outcome = backend.calculate(&ticket.request).await.and_then(|answers| {
        if answers.len() == expected {
            Ok(answers)
        } else {
            Err(FetchError::new(
                FetchTarget::Calculation,
                format!("expected {expected} results, got {}", answers.len()),
            ))
        }
    });
    let answers = match outcome {
        Ok(answers) => answers,
        Err(err) => {
            if !session.lock().await.calc_ticket_current(&ticket) {
                debug!("dropping failure for superseded calculation: {err}");
                return Ok(None);
            }
            warn!("{err}");
            return Err(err.into());
        }
    };

    Ok(session.lock().await.finish_calculation(ticket, answers))
}
