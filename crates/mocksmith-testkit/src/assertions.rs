use mocksmith::{verify, MockHandle, Value};

/// Panicking assertions over one mock's ledger.
pub struct LedgerAssertions<'a> {
    handle: &'a MockHandle,
}

impl<'a> LedgerAssertions<'a> {
    pub fn new(handle: &'a MockHandle) -> Self {
        Self { handle }
    }

    pub fn assert_called(&self, member: &str, args: Vec<Value>, times: usize) {
        if let Err(e) = verify(self.handle).method(member, args).times(times) {
            panic!("{}", e);
        }
    }

    pub fn assert_called_once(&self, member: &str, args: Vec<Value>) {
        self.assert_called(member, args, 1);
    }

    pub fn assert_not_called(&self, member: &str, args: Vec<Value>) {
        self.assert_called(member, args, 0);
    }

    pub fn assert_no_interactions(&self) {
        if let Err(e) = verify(self.handle).no_interactions() {
            panic!("{}", e);
        }
    }

    /// Members in the order their calls arrived, ignoring arguments.
    pub fn assert_call_order(&self, members: &[&str]) {
        let recorded = match self.handle.recorded_calls() {
            Ok(records) => records,
            Err(e) => panic!("{}", e),
        };
        let actual: Vec<&str> = recorded.iter().map(|r| r.selector.member.as_str()).collect();
        assert_eq!(actual, members, "unexpected call order on {}", self.handle);
    }
}
