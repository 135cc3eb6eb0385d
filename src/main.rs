use village_viewer::{flow, village};

fn main() -> anyhow::Result<()> {
    flow::run(village::default_flow)
}
