use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    units: u32,
    locked: bool,
}

#[derive(Debug)]
struct BinCreate {
    label: String,
    units: u32,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Take(u32),
    Lock,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BinError {
    #[error("requested {requested}, only {available} left")]
    Short { requested: u32, available: u32 },
    #[error("bin is locked")]
    Locked,
    #[error("empty label")]
    EmptyLabel,
}

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(BinError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            units: params.units,
            locked: false,
        })
    }

    async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.locked {
            return Err(BinError::Locked);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            BinAction::Take(requested) => {
                if requested > self.units {
                    return Err(BinError::Short {
                        requested,
                        available: self.units,
                    });
                }
                self.units -= requested;
                Ok(self.units)
            }
            BinAction::Lock => {
                self.locked = true;
                Ok(self.units)
            }
        }
    }
}

fn bin(label: &str, units: u32) -> BinCreate {
    BinCreate {
        label: label.into(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id: u32 = client.create(bin("bolts", 5)).await.unwrap();
    assert_eq!(id, 1);

    let left = client.perform_action(id, BinAction::Take(3)).await.unwrap();
    assert_eq!(left, 2);

    let updated: Bin = client
        .update(
            id,
            BinUpdate {
                label: Some("m4 bolts".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "m4 bolts");
    assert_eq!(updated.units, 2);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_typed_entity_error_reaches_caller() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("nuts", 1)).await.unwrap();
    let err = client
        .perform_action(id, BinAction::Take(4))
        .await
        .unwrap_err();

    assert_eq!(
        err.into_entity_error::<BinError>().unwrap(),
        BinError::Short {
            requested: 4,
            available: 1
        }
    );

    let bin: Bin = client.get(id).await.unwrap().unwrap();
    assert_eq!(bin.units, 1, "failed action must not change state");
}

#[tokio::test]
async fn test_failed_create_does_not_consume_an_id() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(bin("", 1)).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<BinError>().unwrap(),
        BinError::EmptyLabel
    );

    assert_eq!(client.create(bin("washers", 1)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_on_delete_can_refuse_removal() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("rivets", 9)).await.unwrap();
    client.perform_action(id, BinAction::Lock).await.unwrap();

    let err = client.delete(id).await.unwrap_err();
    assert_eq!(err.into_entity_error::<BinError>().unwrap(), BinError::Locked);
    assert!(client.get(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_and_missing_ids() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    client.create(bin("a", 1)).await.unwrap();
    client.create(bin("b", 2)).await.unwrap();

    let mut labels: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.label)
        .collect();
    labels.sort();
    assert_eq!(labels, vec!["a", "b"]);

    let missing = client.perform_action(99, BinAction::Take(1)).await;
    assert!(matches!(missing, Err(FrameworkError::NotFound(id)) if id == "99"));
}

#[tokio::test]
async fn test_concurrent_actions_are_linearized() {
    let (actor, client) = ResourceActor::<Bin>::new(64);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("last one", 1)).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, BinAction::Take(1)).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}
