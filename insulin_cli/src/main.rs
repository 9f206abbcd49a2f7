use clap::{Parser, Subcommand};
use insulin_core::initiation::TierInputs;
use insulin_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idose")]
#[command(about = "Inpatient insulin dosing calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the summary document to this file after calculating
    #[arg(long, global = true)]
    export: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// New insulin initiation with correction dose (insulin-naive patients)
    Initiate {
        /// Patient weight in kg
        #[arg(long)]
        weight: Option<String>,

        /// Patient age in years
        #[arg(long)]
        age: Option<String>,

        /// Estimated glomerular filtration rate (mL/min)
        #[arg(long)]
        egfr: Option<String>,

        #[arg(long)]
        liver_dysfunction: bool,

        #[arg(long)]
        bmi_over_30: bool,

        #[arg(long)]
        steroid_use: bool,

        /// Patient is eating (enables nutritional insulin)
        #[arg(long)]
        eating: bool,

        /// TDD multiplier in units/kg, from the derived tier's option set
        #[arg(long)]
        multiplier: Option<String>,

        /// Current glucose (mg/dL)
        #[arg(long)]
        glucose: Option<String>,

        /// Target glucose (mg/dL, default 140)
        #[arg(long)]
        target: Option<String>,
    },

    /// Convert a home insulin regimen to an inpatient starting dose
    Convert {
        /// Home basal dose (units/day)
        #[arg(long)]
        home_basal: Option<String>,

        /// Home bolus dose (units/day)
        #[arg(long)]
        home_bolus: Option<String>,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        egfr: Option<String>,

        #[arg(long)]
        liver_dysfunction: bool,

        #[arg(long)]
        recent_hypoglycemia: bool,

        /// Patient is NPO (no oral intake)
        #[arg(long)]
        npo: bool,

        #[arg(long)]
        eating: bool,
    },

    /// Retitrate an existing regimen from observed glucose patterns
    Adjust {
        /// Current basal dose (units)
        #[arg(long)]
        basal: Option<String>,

        /// Current breakfast bolus (units)
        #[arg(long)]
        breakfast: Option<String>,

        /// Current lunch bolus (units)
        #[arg(long)]
        lunch: Option<String>,

        /// Current dinner bolus (units)
        #[arg(long)]
        dinner: Option<String>,

        #[arg(long)]
        fasting_high: bool,

        #[arg(long)]
        pre_lunch_high: bool,

        #[arg(long)]
        pre_dinner_high: bool,

        #[arg(long)]
        post_meal_high: bool,

        /// Any hypoglycemia observed (overrides all other patterns)
        #[arg(long)]
        any_hypoglycemia: bool,
    },

    /// Standalone correction dose from TDD and current glucose
    Correct {
        /// Total daily dose (units)
        #[arg(long)]
        tdd: Option<String>,

        /// Current glucose (mg/dL)
        #[arg(long)]
        glucose: Option<String>,

        /// Target glucose (mg/dL, default 140)
        #[arg(long)]
        target: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    insulin_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!("Policy config loaded");

    let (title, lines) = match cli.command {
        Commands::Initiate {
            weight,
            age,
            egfr,
            liver_dysfunction,
            bmi_over_30,
            steroid_use,
            eating,
            multiplier,
            glucose,
            target,
        } => cmd_initiate(
            weight,
            age,
            egfr,
            liver_dysfunction,
            bmi_over_30,
            steroid_use,
            eating,
            multiplier,
            glucose,
            target,
        )?,

        Commands::Convert {
            home_basal,
            home_bolus,
            age,
            egfr,
            liver_dysfunction,
            recent_hypoglycemia,
            npo,
            eating,
        } => cmd_convert(
            home_basal,
            home_bolus,
            age,
            egfr,
            liver_dysfunction,
            recent_hypoglycemia,
            npo,
            eating,
            &config,
        ),

        Commands::Adjust {
            basal,
            breakfast,
            lunch,
            dinner,
            fasting_high,
            pre_lunch_high,
            pre_dinner_high,
            post_meal_high,
            any_hypoglycemia,
        } => cmd_adjust(
            basal,
            breakfast,
            lunch,
            dinner,
            fasting_high,
            pre_lunch_high,
            pre_dinner_high,
            post_meal_high,
            any_hypoglycemia,
            &config,
        ),

        Commands::Correct { tdd, glucose, target } => cmd_correct(tdd, glucose, target, &config),
    };

    print_report(&title, &lines);

    if let Some(path) = &cli.export {
        let request = SummaryRequest::new(title, lines);
        let content = insulin_core::summary::render(&request)?;
        std::fs::write(path, content)?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

/// Parse an optional raw numeric argument with the engine's leniency.
fn num(raw: &Option<String>, default: f64) -> f64 {
    primitives::parse_numeric(raw.as_deref().unwrap_or(""), default)
}

#[allow(clippy::too_many_arguments)]
fn cmd_initiate(
    weight: Option<String>,
    age: Option<String>,
    egfr: Option<String>,
    liver_dysfunction: bool,
    bmi_over_30: bool,
    steroid_use: bool,
    eating: bool,
    multiplier: Option<String>,
    glucose: Option<String>,
    target: Option<String>,
) -> Result<(String, Vec<String>)> {
    let profile = PatientProfile {
        weight_kg: num(&weight, 0.0),
        age_years: num(&age, 0.0),
        egfr: num(&egfr, DEFAULT_EGFR),
        liver_dysfunction,
        bmi_over_30,
        steroid_use,
        eating,
        ..PatientProfile::default()
    };

    let mut picker = MultiplierPicker::new(TierInputs::from(&profile));
    let options = picker
        .options()
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Dosing tier: {} (multiplier options: {} units/kg)",
        picker.tier().label(),
        options
    );

    if let Some(ref raw) = multiplier {
        picker.select(primitives::parse_numeric(raw, 0.0))?;
    }

    let outcome = initiation::calculate(&InitiationInputs {
        profile,
        multiplier: picker.selected(),
        glucose: GlucoseReading::new(num(&glucose, 0.0), num(&target, DEFAULT_TARGET_GLUCOSE)),
    });

    Ok((
        "New Insulin Initiation + Correction Dose".to_string(),
        report::initiation_lines(&outcome),
    ))
}

#[allow(clippy::too_many_arguments)]
fn cmd_convert(
    home_basal: Option<String>,
    home_bolus: Option<String>,
    age: Option<String>,
    egfr: Option<String>,
    liver_dysfunction: bool,
    recent_hypoglycemia: bool,
    npo: bool,
    eating: bool,
    config: &Config,
) -> (String, Vec<String>) {
    let inputs = ConversionInputs {
        profile: PatientProfile {
            age_years: num(&age, 0.0),
            egfr: num(&egfr, DEFAULT_EGFR),
            liver_dysfunction,
            recent_hypoglycemia,
            npo,
            eating,
            ..PatientProfile::default()
        },
        home_basal: num(&home_basal, 0.0),
        home_bolus: num(&home_bolus, 0.0),
    };

    let outcome = conversion::calculate(&inputs, &config.conversion);

    (
        "Conversion from Home Insulin".to_string(),
        report::conversion_lines(&outcome),
    )
}

#[allow(clippy::too_many_arguments)]
fn cmd_adjust(
    basal: Option<String>,
    breakfast: Option<String>,
    lunch: Option<String>,
    dinner: Option<String>,
    fasting_high: bool,
    pre_lunch_high: bool,
    pre_dinner_high: bool,
    post_meal_high: bool,
    any_hypoglycemia: bool,
    config: &Config,
) -> (String, Vec<String>) {
    let inputs = AdjustmentInputs {
        basal: num(&basal, 0.0),
        breakfast: num(&breakfast, 0.0),
        lunch: num(&lunch, 0.0),
        dinner: num(&dinner, 0.0),
        fasting_high,
        pre_lunch_high,
        pre_dinner_high,
        post_meal_high,
        any_hypoglycemia,
    };

    let outcome = adjustment::calculate(&inputs, &config.adjustment);

    (
        "In-Hospital Adjustment + Correction".to_string(),
        report::adjustment_lines(&outcome),
    )
}

fn cmd_correct(
    tdd: Option<String>,
    glucose: Option<String>,
    target: Option<String>,
    config: &Config,
) -> (String, Vec<String>) {
    let inputs = CorrectionInputs {
        tdd: num(&tdd, 0.0),
        glucose: GlucoseReading::new(num(&glucose, 0.0), num(&target, DEFAULT_TARGET_GLUCOSE)),
    };

    let outcome = correction::calculate(&inputs, &config.correction);

    (
        "Correction Dose Calculator".to_string(),
        report::correction_lines(&outcome),
    )
}

fn print_report(title: &str, lines: &[String]) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    for line in lines {
        println!("  {}", line);
    }
    println!();
}
