use example_forms::conference_application::{self, ids};
use stepform::{
    Capture, Choice, FormConfig, FormSession, QuestionId, RawEvent, StubFormService, SubmitReply,
    View, confirmation, logging,
};

fn print_step(session: &FormSession) {
    if let Some(progress) = session.progress() {
        println!(
            "--- Step {}/{}: {} ({:.0}%) ---",
            progress.step,
            progress.total,
            progress.label,
            progress.fraction * 100.0
        );
    }
    for field in session.fields() {
        match field.capture() {
            Capture::Unsupported { warning } => println!("  {warning}"),
            capture => println!("  {} [{capture:?}]", field.headline()),
        }
    }
}

fn answer(session: &mut FormSession, event: RawEvent) -> anyhow::Result<()> {
    if !session.handle_event(&event)? {
        tracing::warn!(field = %event.field_id, "input was not recorded");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FormConfig::load()?;
    logging::init_tracing(&config)?;

    let service = StubFormService::new()
        .with_schema(conference_application::conference_application()?)
        .with_submit_reply(SubmitReply::accepted("42", "2019-05-01 12:00"));

    let mut session = FormSession::mount(&service, &config).await;
    if let View::Error { message } = session.view() {
        anyhow::bail!("form unavailable: {message}");
    }

    print_step(&session);
    answer(&mut session, RawEvent::text(&QuestionId::new(ids::FIRST_NAME), "Ada"))?;
    answer(&mut session, RawEvent::text(&QuestionId::new(ids::COUNTRY), "United Kingdom"))?;
    answer(&mut session, RawEvent::checked(&QuestionId::new(ids::NEEDS_VISA), false))?;
    session.next()?;

    print_step(&session);
    answer(
        &mut session,
        RawEvent::text(&QuestionId::new(ids::RESEARCH), "Analytical engines"),
    )?;
    answer(
        &mut session,
        RawEvent::selected(
            &QuestionId::new(ids::CAREER_STAGE),
            Choice::new("industry", "Industry"),
        ),
    )?;
    session.next()?;

    print_step(&session);
    answer(&mut session, RawEvent::file(&QuestionId::new(ids::CV), "ada-cv.pdf"))?;
    session.next()?;

    print_step(&session);
    println!("{}", confirmation::summary(&session.confirmation()));

    match session.submit(&service).await? {
        View::Submitted { timestamp } => {
            println!("Submitted at {}", timestamp.unwrap_or_default());
        }
        View::Error { message } => println!("Submission failed: {message}"),
        other => println!("Unexpected view after submit: {other:?}"),
    }

    Ok(())
}
