fn main() {
    if let Err(err) = weekgrid::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
