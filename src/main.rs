use clap::Parser;
use ezmealplan::commands::{run_loop, save_lists};
use ezmealplan::core::startup::load_lists;
use ezmealplan::core::Reporter;
use ezmealplan::ui::{ConsoleReporter, UserInterface};
use ezmealplan::utils::logger;
use ezmealplan::{AppConfig, CliConfig, LocalStorage, MealManager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let (config, config_error) = AppConfig::resolve_or_default(&cli);
    if let Some(e) = &config_error {
        eprintln!("⚠️  {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        eprintln!("Continuing with the default settings.");
    }

    // 初始化日誌
    logger::init_cli_logger(&config.logging_options());
    if let Some(e) = config_error {
        tracing::warn!("Invalid configuration, using defaults: {}", e);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::from_config(&config);
    let reporter = ConsoleReporter;
    let mut manager = MealManager::new();

    let seeded = match load_lists(&mut manager, &storage, &reporter) {
        Ok(report) => report.used_presets,
        Err(e) => {
            reporter.load_failed(&e);
            false
        }
    };

    // 將只存在於使用者清單的餐點補進主清單
    let promoted = manager.compare_lists();
    if promoted > 0 || seeded {
        if let Err(e) = save_lists(&manager, &storage) {
            tracing::warn!("Could not save meal lists: {}", e);
        }
    }

    tracing::debug!("running EZMealPlan");
    let mut ui = UserInterface::stdio();
    ui.print_greeting()?;
    run_loop(&mut manager, &storage, &mut ui)?;
    tracing::debug!("exiting EZMealPlan");

    Ok(())
}
