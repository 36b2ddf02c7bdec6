use domain::health::entity::{
    AlertRecord, ErrorHistoryEntry, ExternalAlert, HealthReport, Module, ModuleStatus,
};
use domain::health::error::HealthError;

/// Primary port for realtime connection health.
///
/// Inbound calls come from the realtime transport (failure and recovery
/// reports); outbound queries serve dashboards. Implementations must make
/// every mutation atomic with respect to concurrent readers.
pub trait ConnectionHealthPort: Send + Sync {
    /// Report the transport's full view of a module's failures.
    /// `error_count` and `error_history` replace any previous values.
    fn report_failure(
        &self,
        module: Module,
        error_count: u32,
        last_error: String,
        error_history: Vec<ErrorHistoryEntry>,
    );

    /// Clear the module's alert after its connection recovered.
    fn report_recovery(&self, module: Module);

    /// Drop every alert.
    fn clear_all(&self);

    /// Snapshot of the raw records, in no particular order.
    fn list_alerts(&self) -> Vec<AlertRecord>;

    /// Dashboard projection of every active alert.
    fn list_external_alerts(&self) -> Vec<ExternalAlert>;

    fn get_health(&self) -> HealthReport;

    fn get_module_status(&self, module: Module) -> ModuleStatus;

    fn has_active(&self) -> bool;

    /// String-keyed variant of [`report_failure`](Self::report_failure) for
    /// untyped callers. Unknown module names are rejected.
    fn report_failure_by_name(
        &self,
        module: &str,
        error_count: u32,
        last_error: String,
        error_history: Vec<ErrorHistoryEntry>,
    ) -> Result<(), HealthError> {
        let module: Module = module.parse()?;
        self.report_failure(module, error_count, last_error, error_history);
        Ok(())
    }

    /// String-keyed variant of [`report_recovery`](Self::report_recovery).
    fn report_recovery_by_name(&self, module: &str) -> Result<(), HealthError> {
        let module: Module = module.parse()?;
        self.report_recovery(module);
        Ok(())
    }
}
