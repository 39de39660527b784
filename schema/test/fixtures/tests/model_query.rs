//! End-to-end model query scenarios driven through `MemoryStore`.

use typequery::{
    db::{
        predicate::{Matcher, ValidateError},
        query::QueryError,
    },
    prelude::{matcher::*, *},
};
use typequery_testing_fixtures::{User, UserField};

fn seed(store: &mut MemoryStore<User>, users: Vec<User>) -> Vec<User> {
    store.delete_all();

    users
        .into_iter()
        .map(|user| store.create(user).expect("create should succeed"))
        .collect()
}

fn user() -> User {
    User::default()
}

#[test]
fn basic_query() {
    let mut store = MemoryStore::new();
    let [a, b, _c, d] = <[User; 4]>::try_from(seed(
        &mut store,
        vec![
            user().handle("A").bio("Trader").num_posts(1),
            user().handle("B").bio("Trader").num_posts(2),
            user().handle("C").bio("CEO").num_posts(2),
            user().handle("D").bio("Janitor").num_posts(3),
        ],
    ))
    .unwrap();

    // unlike the mock-database suite this replays, where an unconstrained
    // query found nothing, an empty predicate conjunction matches every record
    assert_eq!(store.query().find().unwrap().len(), 4);

    let result = store.query().filter_eq(UserField::Bio, "Janitor").unwrap().find().unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&d));

    let result = store
        .query()
        .filter_eq(UserField::Handle, "A")
        .unwrap()
        .filter_eq(UserField::Bio, "Trader")
        .unwrap()
        .filter_eq(UserField::NumPosts, 1)
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&a));

    let result = store
        .query()
        .filter_eq(UserField::Bio, "Trader")
        .unwrap()
        .filter_eq(UserField::NumPosts, 2)
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&b));

    let result = store
        .query()
        .filter_eq(UserField::NumPosts, 3)
        .unwrap()
        .filter_eq(UserField::Bio, "CEO")
        .unwrap()
        .find()
        .unwrap();
    assert!(result.is_empty());
}

#[test]
fn query_operators() {
    let mut store = MemoryStore::new();
    let [brad, brandon, casey, _john, james] = <[User; 5]>::try_from(seed(
        &mut store,
        vec![
            user().handle("Brad").bio("Soccer player").num_posts(1).created_at_millis(1),
            user()
                .handle("Brandon")
                .bio("Formula 1 driver")
                .num_posts(2)
                .created_at_millis(1)
                .some_datetime(0),
            user().handle("Casey").bio("Singer").num_posts(2).created_at_millis(2),
            user().handle("John").bio("Ice skater").num_posts(3).created_at_millis(2),
            user()
                .handle("James")
                .bio("Surfer")
                .num_posts(5)
                .created_at_millis(3)
                .some_datetime(1_000_000),
        ],
    ))
    .unwrap();

    let count = |field: UserField, matcher: Matcher| {
        store.query().filter(field, matcher).unwrap().find().unwrap().len()
    };

    let result = store.query().filter(UserField::Handle, eq("Brad")).unwrap().find().unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&brad));

    let result = store
        .query()
        .filter(UserField::NumPosts, between(4, 8))
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&james));

    let result = store
        .query()
        .filter(UserField::CreatedAtMillis, lt(2))
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.contains(&brad));
    assert!(result.contains(&brandon));

    assert_eq!(count(UserField::CreatedAtMillis, gt(1)), 3);
    assert_eq!(count(UserField::CreatedAtMillis, lte(2)), 4);
    assert_eq!(count(UserField::CreatedAtMillis, gte(1)), 5);
    assert_eq!(count(UserField::Bio, ends_with("er")), 5);
    assert_eq!(count(UserField::Bio, starts_with("er")), 0);
    assert_eq!(
        count(UserField::SomeDatetime, in_list(Vec::<Timestamp>::new())),
        0
    );

    let err = store
        .query()
        .filter(UserField::SomeDatetime, not_in(Vec::<Timestamp>::new()))
        .err()
        .expect("an empty exclusion set should be rejected");
    assert_eq!(
        err,
        QueryError::Validate(ValidateError::EmptyExclusionSet {
            field: "some_datetime"
        })
    );

    let result = store
        .query()
        .filter(UserField::Bio, contains("f"))
        .unwrap()
        .filter(UserField::NumPosts, in_list([1, 3, 5]))
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&james));

    let result = store
        .query()
        .filter(UserField::Handle, not_in(["Brad", "Brandon", "Jennifer", "John"]))
        .unwrap()
        .filter(UserField::NumPosts, ne(5))
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&casey));

    assert_eq!(count(UserField::SomeDatetime, is_null()), 3);

    let result = store
        .query()
        .filter(UserField::SomeDatetime, is_not_null())
        .unwrap()
        .find()
        .unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.contains(&brandon));
    assert!(result.contains(&james));

    let err = store
        .query()
        .filter(UserField::Handle, in_list([None, Some("brandon")]))
        .err()
        .expect("a null set member should be rejected");
    assert!(err.is_validation());
    assert!(matches!(
        err,
        QueryError::Validate(ValidateError::NullOperand { field: "handle", .. })
    ));
}

#[test]
fn query_by_id() {
    let mut store = MemoryStore::new();
    let users = seed(
        &mut store,
        (0..5).map(|i| user().num_posts(i % 2)).collect(),
    );

    let result = store.query().by_id(users[0].id).find().unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&users[0]));

    let result = store
        .query()
        .by_ids([users[0].id, users[3].id, users[4].id])
        .find()
        .unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.contains(&users[0]));
    assert!(result.contains(&users[3]));
    assert!(result.contains(&users[4]));

    let result = store
        .query()
        .filter(UserField::NumPosts, gt(0))
        .unwrap()
        .by_ids([users[2].id, users[3].id])
        .find()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(&users[3]));
}

#[test]
fn query_with_order() {
    let mut store = MemoryStore::new();
    let [a, b, c, d, e, f, g, h] = <[User; 8]>::try_from(seed(
        &mut store,
        vec![
            user().handle("A").bio("CEO").num_posts(1).some_decimal(0.9),
            user().handle("B").bio("Engineer").num_posts(2).some_decimal(12.1),
            user().handle("C").bio("Analyst").num_posts(3).some_decimal(-0.8),
            user().handle("D").bio("Dean").num_posts(3).some_decimal(0.9),
            user().handle("E").bio("Associate").num_posts(3).some_decimal(1.1),
            user().handle("F").bio("Associate").num_posts(6).some_decimal(1.0),
            user().handle("G").bio("Associate").num_posts(5).some_decimal(2.0),
            user().handle("H").bio("Associate").num_posts(7).some_decimal(0.0),
        ],
    ))
    .unwrap();

    let three_posts = store.query().filter_eq(UserField::NumPosts, 3).unwrap();

    let result = store
        .query()
        .filter_eq(UserField::NumPosts, 3)
        .unwrap()
        .filter_eq(UserField::Bio, "CEO")
        .unwrap()
        .order()
        .find_with_order()
        .unwrap();
    assert!(result.is_empty());

    let result = store
        .query()
        .filter_eq(UserField::Bio, "Analyst")
        .unwrap()
        .order()
        .find_with_order()
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.index_of(&c), Some(0));

    // default order is identity ascending
    let by_default = three_posts.query().clone();
    let ordered = by_default.order().find_with_order(&MemoryEvaluator::new(&store)).unwrap();
    let explicit = by_default
        .order_dir(OrderDirection::Asc)
        .find_with_order(&MemoryEvaluator::new(&store))
        .unwrap();
    assert_eq!(ordered.into_vec(), vec![c.clone(), d.clone(), e.clone()]);
    assert_eq!(explicit.into_vec(), vec![c.clone(), d.clone(), e.clone()]);

    let result = store
        .query()
        .filter_eq(UserField::NumPosts, 3)
        .unwrap()
        .order_dir(OrderDirection::Desc)
        .find_with_order()
        .unwrap();
    assert_eq!(result.into_vec(), vec![e.clone(), d.clone(), c.clone()]);

    let result = store
        .query()
        .filter_eq(UserField::NumPosts, 3)
        .unwrap()
        .order_by(UserField::Bio)
        .find_with_order()
        .unwrap();
    assert_eq!(result.into_vec(), vec![c.clone(), e.clone(), d.clone()]);

    let result = three_posts
        .order_by_dir(UserField::Bio, OrderDirection::Desc)
        .find_with_order()
        .unwrap();
    assert_eq!(result.into_vec(), vec![d.clone(), e.clone(), c.clone()]);

    let result = store
        .query()
        .filter(UserField::NumPosts, gt(0))
        .unwrap()
        .order_by(UserField::NumPosts)
        .order_by(UserField::Bio)
        .find_with_order()
        .unwrap();
    assert_eq!(
        result.into_vec(),
        vec![
            a.clone(),
            b.clone(),
            c.clone(),
            e.clone(),
            d.clone(),
            g.clone(),
            f.clone(),
            h.clone()
        ]
    );

    let result = store
        .query()
        .filter(UserField::NumPosts, gt(0))
        .unwrap()
        .order_by(UserField::SomeDecimal)
        .order_by_dir(UserField::Bio, OrderDirection::Desc)
        .find_with_order()
        .unwrap();
    assert_eq!(result.into_vec(), vec![c, h, d, a, f, e, g, b]);
}

#[test]
fn query_by_id_with_order() {
    let mut store = MemoryStore::new();
    let users = seed(
        &mut store,
        (0..5).map(|i| user().num_posts(i % 2)).collect(),
    );

    let result = store.query().by_id(users[0].id).order().find_with_order().unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.index_of(&users[0]), Some(0));

    let result = store
        .query()
        .by_ids([])
        .order_by(UserField::NumPosts)
        .limit(1)
        .find_with_order()
        .unwrap();
    assert!(result.is_empty());

    let ids = [users[0].id, users[1].id, users[2].id];
    let ordered = store.query().by_ids(ids).order().find_with_order().unwrap();
    let explicit = store
        .query()
        .by_ids(ids)
        .order_dir(OrderDirection::Asc)
        .find_with_order()
        .unwrap();
    assert_eq!(ordered.ids(), ids);
    assert_eq!(ordered, explicit);

    let result = store
        .query()
        .by_ids(users.iter().map(|u| u.id))
        .order_by_dir(UserField::NumPosts, OrderDirection::Desc)
        .order_dir(OrderDirection::Desc)
        .find_with_order()
        .unwrap();
    assert_eq!(
        result.ids(),
        [users[3].id, users[1].id, users[4].id, users[2].id, users[0].id]
    );
}

#[test]
fn query_with_limit() {
    let mut store = MemoryStore::new();
    seed(&mut store, (0..10).map(|i| user().num_posts(i)).collect());

    let result = store
        .query()
        .filter(UserField::NumPosts, lt(5))
        .unwrap()
        .order_by(UserField::NumPosts)
        .limit(3)
        .find_with_order()
        .unwrap();
    let posts: Vec<_> = result.iter().map(|u| u.num_posts).collect();
    assert_eq!(posts, [Some(0), Some(1), Some(2)]);

    let result = store
        .query()
        .filter(UserField::NumPosts, gt(3))
        .unwrap()
        .order_by(UserField::NumPosts)
        .limit_offset(2, 3)
        .find_with_order()
        .unwrap();
    let posts: Vec<_> = result.iter().map(|u| u.num_posts).collect();
    assert_eq!(posts, [Some(6), Some(7), Some(8)]);

    let result = store
        .query()
        .filter(UserField::NumPosts, lt(5))
        .unwrap()
        .order_by(UserField::NumPosts)
        .limit(3)
        .find()
        .unwrap();
    assert_eq!(result.len(), 3);

    let result = store
        .query()
        .filter(UserField::NumPosts, gt(3))
        .unwrap()
        .limit_offset(2, 3)
        .find()
        .unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn query_with_select() {
    let mut store = MemoryStore::new();
    seed(
        &mut store,
        vec![
            user().handle("AAAA").bio("Batman").created_at_millis(1).num_posts(1),
            user().handle("BBBB").bio("Superman").created_at_millis(1),
            user().handle("CCCC").bio("Spiderman").created_at_millis(1),
        ],
    );
    let heroes = store.query().filter(UserField::Bio, ends_with("man")).unwrap();

    let result = heroes.select([UserField::Handle]).find().unwrap();
    assert_eq!(result.len(), 3);
    for user in result {
        assert!(!user.handle.is_empty());
        assert_eq!(user.bio.as_deref(), Some(""));
        assert_eq!(user.created_at_millis, None);
        assert_eq!(user.num_posts, None);
    }

    let heroes = store.query().filter(UserField::Bio, ends_with("man")).unwrap();
    let result = heroes
        .select([UserField::Handle, UserField::CreatedAtMillis])
        .find_with_order()
        .unwrap();
    for user in result {
        assert!(!user.handle.is_empty());
        assert_eq!(user.created_at_millis, Some(1));
        assert_eq!(user.bio.as_deref(), Some(""));
    }

    let heroes = store.query().filter(UserField::Bio, ends_with("man")).unwrap();
    let result = heroes
        .select([UserField::CreatedAtMillis])
        .find_with_order()
        .unwrap();
    for user in result {
        assert_eq!(user.handle, "");
        assert_eq!(user.created_at_millis, Some(1));
        assert_eq!(user.bio.as_deref(), Some(""));
    }
}

#[test]
fn group_by() {
    let mut store = MemoryStore::new();
    seed(
        &mut store,
        (0..100)
            .map(|i| user().handle(&(i % 2).to_string()).num_posts(i))
            .collect(),
    );

    let grouped = |agg: Aggregate<UserField>| -> Vec<(String, Option<i64>)> {
        store
            .query()
            .select([UserField::Handle])
            .select_agg(agg)
            .unwrap()
            .group_by([UserField::Handle])
            .order_by(UserField::Handle)
            .find_with_order()
            .unwrap()
            .into_iter()
            .map(|u| (u.handle, u.num_posts))
            .collect()
    };
    let expect = |zero: i64, one: i64| {
        vec![("0".to_string(), Some(zero)), ("1".to_string(), Some(one))]
    };

    assert_eq!(grouped(aggregate::max(UserField::NumPosts)), expect(98, 99));
    assert_eq!(grouped(aggregate::min(UserField::NumPosts)), expect(0, 1));
    assert_eq!(grouped(aggregate::count(UserField::NumPosts)), expect(50, 50));
    assert_eq!(grouped(aggregate::sum(UserField::NumPosts)), expect(2450, 2500));
    assert_eq!(grouped(aggregate::avg(UserField::NumPosts)), expect(49, 50));
}

#[test]
fn group_by_requires_an_aggregate() {
    let store: MemoryStore<User> = MemoryStore::new();

    let err = store
        .query()
        .group_by([UserField::Handle])
        .find()
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::Validate(ValidateError::InconsistentGroupAggregateState {
            group_by: true,
            aggregate: false,
        })
    );

    let err = store
        .query()
        .select_agg(aggregate::sum(UserField::Handle))
        .err()
        .expect("sum over text should be rejected");
    assert!(matches!(
        err,
        QueryError::Validate(ValidateError::InvalidFieldForAggregation { field: "handle", .. })
    ));
}

#[test]
fn users_round_trip_through_json() {
    let user = user().handle("A").bio("Trader").some_datetime(5);

    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();

    assert_eq!(back, user);
}
