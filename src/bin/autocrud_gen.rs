fn main() {
    if let Err(e) = autocrud::logging::init_logging() {
        eprintln!("⚠️  Logging disabled: {e:#}");
    }
    if let Err(e) = autocrud::cli::run_cli() {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}
