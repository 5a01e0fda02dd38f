fn main() {
    quarry::run_cli();
}
