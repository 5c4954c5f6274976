//! Tests for progress tracking and multi-file batch processing

#[cfg(test)]
mod tests {
    use piecemosaic::algorithm::transport::SolveProgress;
    use piecemosaic::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use piecemosaic::io::progress::{FileProgress, ProgressManager};
    use std::path::Path;
    use std::time::Duration;

    // Tests ProgressManager lifecycle for a single file
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_single_file() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        assert_eq!(pm.file_count(), 1);

        let reporter = pm.start_file(0, Path::new("test.png"));
        reporter.on_start(10);
        reporter.on_augmentation(5, 10);
        assert_eq!(reporter.position(), 5);
        reporter.on_finish();
        assert_eq!(reporter.position(), 10);

        pm.complete_file(0, Path::new("test.png"), Duration::from_millis(100));
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let mut pm = ProgressManager::default();
        pm.initialize(0);
        assert_eq!(pm.file_count(), 0);

        // No bars exist, so the reporter is hidden but still tracks position
        let reporter = pm.start_file(0, Path::new("a.png"));
        reporter.on_start(3);
        reporter.on_augmentation(2, 3);
        assert_eq!(reporter.position(), 2);
        pm.finish();
    }

    // Tests batch mode with more files than individual bars
    // Verified by creating one bar per file
    #[test]
    fn test_batch_mode_rotates_bars() {
        let mut pm = ProgressManager::new();
        let files = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        pm.initialize(files);

        for index in 0..files {
            let path = format!("file{index}.png");
            let reporter = pm.start_file(index, Path::new(&path));
            reporter.on_start(4);
            for step in 1..=4 {
                reporter.on_augmentation(step, 4);
            }
            reporter.on_finish();
            pm.complete_file(index, Path::new(&path), Duration::from_millis(1));
        }
        pm.finish();
    }

    // Tests the hidden reporter accepts every event
    // Verified by panicking on hidden bars
    #[test]
    fn test_hidden_reporter() {
        let reporter = FileProgress::hidden();
        reporter.on_start(2);
        reporter.on_augmentation(1, 2);
        reporter.on_finish();
        assert_eq!(reporter.position(), 2);
    }
}
