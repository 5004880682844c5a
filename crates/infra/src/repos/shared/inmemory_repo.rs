use pillsync_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    for i in 0..collection.len() {
        if collection[i].id() == val.id() {
            collection.splice(i..i + 1, vec![val.clone()]);
        }
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|val| val.id() == val_id).cloned()
}

pub fn find_by<T: Clone + Entity, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    for i in 0..collection.len() {
        if collection[i].id() == val_id {
            let deleted_val = collection.remove(i);
            return Some(deleted_val);
        }
    }
    None
}

/// Applies `update` to the entity with the given id while the collection
/// lock is held, but only when `precondition` still accepts the stored
/// value. Returns whether the update was applied. This is the inmemory
/// rendition of the document store's transaction primitive.
pub fn update_checked<T, F, U>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    precondition: F,
    update: U,
) -> bool
where
    T: Clone + Entity,
    F: Fn(&T) -> bool,
    U: FnOnce(&mut T),
{
    let mut collection = collection.lock().unwrap();
    for item in collection.iter_mut() {
        if item.id() == val_id {
            if !precondition(item) {
                return false;
            }
            update(item);
            return true;
        }
    }
    false
}
