//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use platformgen::io::progress::ProgressManager;
    use std::time::Duration;

    // Tests a manager without a bar ignores updates
    // Verified by creating the bar eagerly
    #[test]
    fn test_uninitialized_manager() {
        let manager = ProgressManager::new();
        manager.start_level(1);
        manager.complete_level(1, 1, Duration::from_millis(5));
        manager.finish();
        assert_eq!(manager.completed(), 0);
    }

    // Tests completed levels are counted
    // Verified by counting started levels instead
    #[test]
    fn test_completed_levels_counted() {
        let mut manager = ProgressManager::default();
        manager.initialize(3);

        manager.start_level(7);
        manager.complete_level(7, 2, Duration::from_millis(12));
        manager.start_level(8);
        assert_eq!(manager.completed(), 1);

        manager.complete_level(8, 1, Duration::from_millis(3));
        manager.finish();
        assert_eq!(manager.completed(), 2);
    }
}
