fn main() {
    std::process::exit(filemeta::cli::run());
}
