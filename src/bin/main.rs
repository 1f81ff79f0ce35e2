use header_forge::ops::telemetry;
use header_forge::HeaderProfile;

fn main() {
    // Initialize Telemetry
    telemetry::init_tracing_with_level("header_forge=debug,info");

    let profile = HeaderProfile::new();
    tracing::info!(browser = %profile.identity().browser, "Generated header profile");

    println!("{}", profile.to_text());
}
