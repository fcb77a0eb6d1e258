use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use splitledger_balances::{Expense, Member, OverpaymentPolicy, Settlement, Split};
use splitledger_core::{DomainError, ExpenseId, GroupId, MemberId, Money, SettlementId};
use splitledger_infra::{
    BalanceConfig, BalanceService, GroupRecordSource, InMemoryGroupStore, ServiceError, StoreError,
};

struct Fixture {
    store: Arc<InMemoryGroupStore>,
    group: GroupId,
    a: Member,
    b: Member,
    c: Member,
}

impl Fixture {
    fn new() -> Self {
        splitledger_observability::tracing::init_for_tests();
        let store = Arc::new(InMemoryGroupStore::new());
        let a = Member::new(MemberId::new(), "Ada");
        let b = Member::new(MemberId::new(), "Bo");
        let c = Member::new(MemberId::new(), "Cy");
        let group = store
            .create_group("flat", vec![a.clone(), b.clone(), c.clone()])
            .unwrap();
        Self { store, group, a, b, c }
    }

    fn service(&self, config: BalanceConfig) -> BalanceService<Arc<InMemoryGroupStore>> {
        BalanceService::new(self.store.clone(), config)
    }

    fn record_equal_split(&self, payer: &Member, total: i64) {
        let members = [&self.a, &self.b, &self.c];
        let share = Money::from_minor(total / members.len() as i64);
        let expense = Expense {
            id: ExpenseId::new(),
            payer_id: payer.id,
            amount: Money::from_minor(total),
            description: "groceries".to_string(),
            occurred_at: Utc::now(),
            splits: members.iter().map(|m| Split::new(m.id, share)).collect(),
        };
        self.store.record_expense(self.group, expense).unwrap();
    }

    fn record_settlement(&self, payer: &Member, receiver: &Member, amount: i64) {
        let settlement = Settlement {
            id: SettlementId::new(),
            payer_id: payer.id,
            receiver_id: receiver.id,
            amount: Money::from_minor(amount),
            occurred_at: Utc::now(),
        };
        self.store.record_settlement(self.group, settlement).unwrap();
    }
}

#[tokio::test]
async fn member_gets_full_report() {
    let fx = Fixture::new();
    fx.record_equal_split(&fx.a, 3_000);
    fx.record_settlement(&fx.b, &fx.a, 1_000);

    let report = fx
        .service(BalanceConfig::default())
        .group_balances(fx.group, fx.c.id)
        .await
        .unwrap();

    assert_eq!(report.members.len(), 3);
    assert_eq!(report.balance_of(&fx.a.id).unwrap().total_balance, Money::from_minor(1_000));
    assert_eq!(report.balance_of(&fx.b.id).unwrap().total_balance, Money::ZERO);
    assert_eq!(report.owed_between(&fx.c.id, &fx.a.id), Some(Money::from_minor(1_000)));
    assert_eq!(report.user_lookup_map[&fx.b.id].name, "Bo");
}

#[tokio::test]
async fn unknown_group_is_not_found() {
    let fx = Fixture::new();

    let err = fx
        .service(BalanceConfig::default())
        .group_balances(GroupId::new(), fx.a.id)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::NotFound)));
}

#[tokio::test]
async fn outsider_is_unauthorized() {
    let fx = Fixture::new();
    fx.record_equal_split(&fx.a, 3_000);

    let service = fx.service(BalanceConfig::default());
    let outsider = MemberId::new();

    let err = service.group_balances(fx.group, outsider).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Unauthorized)));

    let err = service.authorize(fx.group, outsider).await.unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Unauthorized)));
}

#[tokio::test]
async fn negative_amount_is_rejected_before_compute() {
    let fx = Fixture::new();
    fx.record_settlement(&fx.b, &fx.a, -500);

    let err = fx
        .service(BalanceConfig::default())
        .group_balances(fx.group, fx.a.id)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::DataIntegrity(_))));
}

#[tokio::test]
async fn reject_policy_from_config_refuses_overpayment() {
    let fx = Fixture::new();
    fx.record_equal_split(&fx.a, 3_000);
    fx.record_settlement(&fx.b, &fx.a, 1_500);

    let config = BalanceConfig {
        overpayment_policy: OverpaymentPolicy::Reject,
        ..BalanceConfig::default()
    };
    let err = fx.service(config).group_balances(fx.group, fx.a.id).await.unwrap_err();

    assert!(matches!(err, ServiceError::Domain(DomainError::Overpayment { .. })));
}

#[tokio::test]
async fn removed_member_history_is_tolerated() {
    let fx = Fixture::new();
    fx.record_equal_split(&fx.a, 3_000);
    assert!(fx.store.remove_member(fx.group, fx.c.id).unwrap());

    let report = fx
        .service(BalanceConfig::default())
        .group_balances(fx.group, fx.a.id)
        .await
        .unwrap();

    assert_eq!(report.members.len(), 2);
    assert_eq!(report.balance_of(&fx.a.id).unwrap().total_balance, Money::from_minor(1_000));
    let total: i64 = report
        .balances
        .iter()
        .map(|b| b.total_balance.minor_units())
        .sum();
    assert_eq!(total, 0);
}

/// Source whose expense read never finishes in time.
struct SlowSource {
    inner: InMemoryGroupStore,
    delay: Duration,
}

#[async_trait::async_trait]
impl GroupRecordSource for SlowSource {
    async fn group_exists(&self, group_id: GroupId) -> Result<bool, StoreError> {
        self.inner.group_exists(group_id).await
    }

    async fn members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError> {
        self.inner.members(group_id).await
    }

    async fn expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.expenses(group_id).await
    }

    async fn settlements(&self, group_id: GroupId) -> Result<Vec<Settlement>, StoreError> {
        self.inner.settlements(group_id).await
    }
}

#[tokio::test]
async fn slow_gather_times_out() {
    let inner = InMemoryGroupStore::new();
    let member = Member::new(MemberId::new(), "solo");
    let group = inner.create_group("slow", vec![member.clone()]).unwrap();
    let source = SlowSource {
        inner,
        delay: Duration::from_secs(30),
    };

    let config = BalanceConfig {
        gather_timeout: Duration::from_millis(50),
        ..BalanceConfig::default()
    };
    let err = BalanceService::new(source, config)
        .group_balances(group, member.id)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Timeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn unavailable_store_surfaces_as_store_error() {
    struct DownSource;

    #[async_trait::async_trait]
    impl GroupRecordSource for DownSource {
        async fn group_exists(&self, _group_id: GroupId) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn members(&self, _group_id: GroupId) -> Result<Vec<Member>, StoreError> {
            unreachable!("existence check fails first")
        }

        async fn expenses(&self, _group_id: GroupId) -> Result<Vec<Expense>, StoreError> {
            unreachable!("existence check fails first")
        }

        async fn settlements(&self, _group_id: GroupId) -> Result<Vec<Settlement>, StoreError> {
            unreachable!("existence check fails first")
        }
    }

    let err = BalanceService::new(DownSource, BalanceConfig::default())
        .group_balances(GroupId::new(), MemberId::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));
}
