use clap::Parser;
use config_convert::core::ConfigProvider;
use config_convert::utils::{logger, validation::Validate};
use config_convert::{CliConfig, ConvertConfig, ConvertError, ConvertPipeline, EtlEngine, LocalStorage};

fn main() {
    let cli = CliConfig::parse();

    // 設定檔錯誤發生在日誌初始化之前，直接輸出到 stderr
    let config = match ConvertConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    tracing::info!(
        "Processing file '{}' and going to save output into '{}' as {} with root key {:?}",
        config.input_path().display(),
        config.output_path().display(),
        config.output_format(),
        config.root_key()
    );

    let monitor_enabled = config.monitor;
    let pipeline = ConvertPipeline::new(LocalStorage::new(), config);
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if let Err(e) = engine.run() {
        exit_with(&e);
    }
}

fn exit_with(e: &ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
