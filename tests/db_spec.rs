use notebot::db::{Database, NoteStore};
use notebot::models::*;
use speculate2::speculate;
use uuid::Uuid;

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
        let alice = OwnerId::from("alice");
        let bob = OwnerId::from("bob");
    }

    describe "insert" {
        it "assigns an identity and keeps the text" {
            let note = db.insert(&alice, "buy milk").expect("Failed to insert");

            assert_ne!(note.id, Uuid::nil());
            assert_eq!(note.owner_id, alice);
            assert_eq!(note.text, "buy milk");
        }

        it "assigns distinct identities to identical notes" {
            let first = db.insert(&alice, "same").expect("Failed to insert");
            let second = db.insert(&alice, "same").expect("Failed to insert");

            assert_ne!(first.id, second.id);
            assert_eq!(db.list(&alice).expect("Query failed").len(), 2);
        }
    }

    describe "list" {
        it "returns empty list for an unknown owner" {
            let notes = db.list(&alice).expect("Query failed");
            assert!(notes.is_empty());
        }

        it "returns notes in insertion order" {
            db.insert(&alice, "zebra").expect("Failed to insert");
            db.insert(&alice, "apple").expect("Failed to insert");
            db.insert(&alice, "mango").expect("Failed to insert");

            let texts: Vec<String> = db
                .list(&alice)
                .expect("Query failed")
                .into_iter()
                .map(|n| n.text)
                .collect();
            assert_eq!(texts, vec!["zebra", "apple", "mango"]);
        }

        it "only returns the owner's notes" {
            db.insert(&alice, "mine").expect("Failed to insert");
            db.insert(&bob, "theirs").expect("Failed to insert");

            let notes = db.list(&bob).expect("Query failed");
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].text, "theirs");
            assert_eq!(notes[0].owner_id, bob);
        }

        it "round-trips identity and timestamp" {
            let created = db.insert(&alice, "x").expect("Failed to insert");
            let listed = db.list(&alice).expect("Query failed");

            assert_eq!(listed[0].id, created.id);
            assert_eq!(listed[0].created_at.timestamp(), created.created_at.timestamp());
        }
    }

    describe "delete" {
        it "removes the note by identity" {
            let keep = db.insert(&alice, "keep").expect("Failed to insert");
            let gone = db.insert(&alice, "gone").expect("Failed to insert");

            assert!(db.delete(gone.id).expect("Delete failed"));

            let notes = db.list(&alice).expect("Query failed");
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].id, keep.id);
        }

        it "reports not found for an unknown identity" {
            assert!(!db.delete(Uuid::new_v4()).expect("Delete failed"));
        }

        it "reports not found the second time" {
            let note = db.insert(&alice, "once").expect("Failed to insert");

            assert!(db.delete(note.id).expect("Delete failed"));
            assert!(!db.delete(note.id).expect("Delete failed"));
        }
    }

    describe "open" {
        it "persists notes across reopen" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("notes.db");

            {
                let db = Database::open(path.clone()).expect("Failed to open");
                db.migrate().expect("Failed to migrate");
                db.insert(&alice, "durable").expect("Failed to insert");
            }

            let db = Database::open(path).expect("Failed to reopen");
            db.migrate().expect("Failed to migrate");
            let notes = db.list(&alice).expect("Query failed");
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].text, "durable");
        }
    }
}
