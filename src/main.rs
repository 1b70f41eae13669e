fn main() {
    if let Err(err) = csv_intake::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
