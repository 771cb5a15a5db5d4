fn main() {
    if let Err(e) = flow_tui::app::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
