mod command;
mod model;
mod storage;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
