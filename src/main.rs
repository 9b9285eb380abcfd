fn main() {
    handled_errors::app::startup::startup();
}
