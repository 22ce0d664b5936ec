//! Shot campaign statistics.

use qmem_core::scheduler::ShotRecord;

/// Aggregated counters for one run of memory shots.
///
/// Tracks how many shots completed, how many ever saw a nonzero syndrome
/// (and therefore applied a correction), how many ended with a flipped
/// logical readout bit, and how many were aborted by backend failures.
/// Aborted shots contribute no readout bits.
pub struct RunStats {
    pub shots: u64,
    pub corrected: u64,
    pub logical_flips: u64,
    pub aborted: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            shots: 0,
            corrected: 0,
            logical_flips: 0,
            aborted: 0,
        }
    }

    /// Folds one completed shot into the counters.
    pub fn tally(&mut self, record: &ShotRecord) {
        self.shots += 1;
        if !record.is_clean() {
            self.corrected += 1;
        }
        if record.has_logical_flip() {
            self.logical_flips += 1;
        }
    }

    /// Prints a summary report for a run that took `seconds`.
    pub fn print_report(&self, seconds: f64) {
        let throughput = if seconds > 0.0 {
            self.shots as f64 / seconds
        } else {
            0.0
        };

        println!("\nResults");
        println!("Shots:         {}", self.shots);
        println!("Corrected:     {}", self.corrected);
        println!("Logical flips: {}", self.logical_flips);
        if self.aborted > 0 {
            println!("Aborted:       {}", self.aborted);
        }
        println!("Time: {:.4} s", seconds);
        println!("Throughput: {:.2} shots/s", throughput);
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
