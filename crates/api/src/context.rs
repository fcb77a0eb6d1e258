use splitledger_core::MemberId;

/// Caller identity for a request.
///
/// Established by [`identity_middleware`](crate::middleware::identity_middleware)
/// and present on every protected route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CallerContext {
    member_id: MemberId,
}

impl CallerContext {
    pub fn new(member_id: MemberId) -> Self {
        Self { member_id }
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }
}
