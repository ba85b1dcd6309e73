/// Hooks called by the simulation driver while generations run
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_profit: f64, best_so_far: f64);
    fn on_agent_evaluated(&mut self, agent_num: usize, total: usize);
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_profit: f64, best_so_far: f64) {
        log::info!(
            "Generation {} complete. Best profit: {:.2}, best so far: {:.2}",
            generation + 1,
            best_profit,
            best_so_far
        );
    }

    fn on_agent_evaluated(&mut self, agent_num: usize, total: usize) {
        if agent_num % 10 == 0 || agent_num == total {
            log::trace!("  Evaluated {}/{} agents", agent_num, total);
        }
    }
}

/// Discards all progress events
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_profit: f64, _best_so_far: f64) {}
    fn on_agent_evaluated(&mut self, _agent_num: usize, _total: usize) {}
}
