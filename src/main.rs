//! Console front end for the assessment flow.
//!
//! Reads commands from stdin, routes form submissions through the onboarding
//! handlers and everything else straight to the flow runtime. Published
//! events are echoed as they happen.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use checked::adapters::console::HELP;
use checked::adapters::{
    BroadcastEventBus, ConsoleCommand, InMemoryResultsStore, MockAuthGateway, SimulatedVitalsSource,
};
use checked::application::{
    FlowHandle, FlowRuntime, OnboardingError, RequestPasswordResetCommand,
    RequestPasswordResetHandler, ResetPasswordCommand, ResetPasswordHandler, RuntimePorts,
    StartOAuthCommand, StartOAuthHandler, SubmitDemographicsCommand, SubmitDemographicsHandler,
    SubmitLoginCommand, SubmitLoginHandler, SubmitSignUpCommand, SubmitSignUpHandler,
};
use checked::config::{AppConfig, TelemetryConfig};
use checked::domain::flow::{AuthProvider, FlowSnapshot, Outcome};
use checked::domain::foundation::StateMachine;
use checked::domain::onboarding::Device;
use checked::ports::AuthGateway;

/// Events the console echo may lag behind before it skips some.
const EVENT_BACKLOG: usize = 64;

fn init_tracing(telemetry: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&telemetry.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if telemetry.json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}

struct Console {
    flow: FlowHandle,
    sign_up: SubmitSignUpHandler,
    login: SubmitLoginHandler,
    demographics: SubmitDemographicsHandler,
    forgot: RequestPasswordResetHandler,
    reset: ResetPasswordHandler,
    oauth: StartOAuthHandler,
}

impl Console {
    fn new(flow: FlowHandle, auth: Arc<dyn AuthGateway>) -> Self {
        Self {
            sign_up: SubmitSignUpHandler::new(auth.clone(), flow.clone()),
            login: SubmitLoginHandler::new(auth.clone(), flow.clone()),
            demographics: SubmitDemographicsHandler::new(flow.clone()),
            forgot: RequestPasswordResetHandler::new(auth.clone(), flow.clone()),
            reset: ResetPasswordHandler::new(auth.clone(), flow.clone()),
            oauth: StartOAuthHandler::new(auth, flow.clone()),
            flow,
        }
    }

    /// Runs one command. Returns `false` when the user asked to quit.
    async fn run(&self, command: ConsoleCommand) -> Result<bool, OnboardingError> {
        match command {
            ConsoleCommand::Act(action) => report(self.flow.dispatch(action).await?),
            ConsoleCommand::Identity(event) => report(self.flow.identity(event).await?),
            ConsoleCommand::SignUp {
                first_name,
                email,
                password,
            } => {
                let result = self
                    .sign_up
                    .handle(SubmitSignUpCommand {
                        first_name,
                        email,
                        password,
                    })
                    .await?;
                if result.account.confirmation_required {
                    println!("check {} for a confirmation link", result.account.email);
                }
                report(result.outcome);
            }
            ConsoleCommand::SignIn { email, password } => {
                let result = self.login.handle(SubmitLoginCommand { email, password }).await?;
                report(result.outcome);
            }
            ConsoleCommand::ForgotPassword { email } => {
                let result = self
                    .forgot
                    .handle(RequestPasswordResetCommand { email })
                    .await?;
                println!("reset link sent to {}", result.sent_to);
            }
            ConsoleCommand::ResetPassword {
                password,
                confirmation,
            } => {
                let result = self
                    .reset
                    .handle(ResetPasswordCommand {
                        password,
                        confirmation,
                    })
                    .await?;
                report(result.outcome);
            }
            ConsoleCommand::Demographics {
                age,
                weight,
                weight_unit,
                gender,
            } => {
                let result = self
                    .demographics
                    .handle(SubmitDemographicsCommand {
                        age,
                        weight,
                        weight_unit,
                        gender,
                    })
                    .await?;
                report(result.outcome);
            }
            ConsoleCommand::Google => {
                self.oauth
                    .handle(StartOAuthCommand {
                        provider: AuthProvider::Google,
                    })
                    .await?;
                println!("waiting for google; use 'signed-in google new|returning'");
            }
            ConsoleCommand::Status => {
                let snapshot = self.flow.snapshot().await?;
                print_status(&snapshot);
                if let Ok(classification) = self.flow.classify().await {
                    println!("  blood pressure: {}", classification.bp_status.label());
                    if let Some(severity) = classification.severity {
                        println!(
                            "  {} ({} symptoms): {}",
                            severity.tier.label(),
                            severity.symptom_count,
                            severity.guidance.title
                        );
                        println!("  {}", severity.guidance.full_text());
                    }
                }
            }
            ConsoleCommand::Devices => {
                for device in Device::catalog() {
                    println!("  {:<20} {} ({})", device.id.as_str(), device.name, device.status);
                }
            }
            ConsoleCommand::Help => println!("{HELP}"),
            ConsoleCommand::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Ignored => println!("nothing happens"),
        Outcome::Moved(transition) => println!("{} -> {}", transition.from, transition.to),
        Outcome::SaveRequested(_) => println!("saving results"),
    }
}

fn print_status(snapshot: &FlowSnapshot) {
    println!(
        "screen {} ({}% complete), session {}",
        snapshot.screen, snapshot.completion_percent, snapshot.session_id
    );
    if let Some(reading) = &snapshot.reading {
        println!("  reading {}/{}", reading.systolic(), reading.diastolic());
    }
    let next: Vec<String> = snapshot
        .screen
        .valid_transitions()
        .iter()
        .map(ToString::to_string)
        .collect();
    if !next.is_empty() {
        println!("  next: {}", next.join(", "));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.telemetry);
    config.validate()?;
    info!(environment = ?config.environment, "Starting checked");

    let bus = Arc::new(BroadcastEventBus::new(EVENT_BACKLOG));
    let ports = RuntimePorts {
        events: bus.clone(),
        results: Arc::new(InMemoryResultsStore::new()),
        vitals: Arc::new(SimulatedVitalsSource::new()?),
    };
    let auth: Arc<dyn AuthGateway> = Arc::new(MockAuthGateway::new());

    let (flow, runtime) = FlowRuntime::spawn(config.timers.settings(), ports);

    let mut live = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match live.recv().await {
                Ok(event) => println!("  [{}] {}", event.event_type, event.payload),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event echo fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("{HELP}");
    let console = Console::new(flow, auth);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match console.run(command).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(OnboardingError::Flow(e)) => {
                error!(error = %e, "Flow runtime failed");
                break;
            }
            Err(e) => println!("{e}"),
        }
    }

    drop(console);
    let _ = runtime.await;
    Ok(())
}
