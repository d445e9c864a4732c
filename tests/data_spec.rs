use std::fs;

use mbird::data::{MbirdData, TREE_FNAME};
use mbird::models::*;
use mbird::{Error, ErrorKind};
use speculate2::speculate;

fn chain() -> MbirdNode {
    let node2 = MbirdNode::new("node2");
    let node1 = MbirdNode::with_children("node1", vec![node2]).expect("Failed to build node1");
    MbirdNode::with_children("root", vec![node1]).expect("Failed to build root")
}

speculate! {
    before {
        let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    }

    describe "create" {
        it "starts with a single stale root" {
            let data = MbirdData::create();
            let root = data.root().expect("No root");
            assert_eq!(root.id(), "root");
            assert!(root.is_stale());
            assert!(root.children().is_empty());
        }
    }

    describe "save" {
        it "writes the tree file" {
            let dir = tmp.path().join("test_dir.mbird");
            let written = MbirdData::with_root(chain()).save(&dir).expect("Save failed");

            assert_eq!(written, dir);
            assert!(dir.join(TREE_FNAME).exists());
        }

        it "appends the .mbird extension if missing" {
            let written = MbirdData::create()
                .save(tmp.path().join("myproject"))
                .expect("Save failed");

            let expected = tmp.path().join("myproject.mbird");
            assert_eq!(written, expected);
            assert!(expected.join(TREE_FNAME).exists());
            assert!(!tmp.path().join("myproject").exists());
        }

        it "drops a trailing separator before appending the extension" {
            let with_slash = format!("{}/", tmp.path().join("proj").display());
            let written = MbirdData::create().save(&with_slash).expect("Save failed");

            let expected = tmp.path().join("proj.mbird");
            assert_eq!(written, expected);
            assert!(expected.join(TREE_FNAME).exists());
            assert!(!tmp.path().join("proj").exists());

            let loaded = MbirdData::open(&written).expect("Load failed");
            assert_eq!(loaded.root().expect("No root").id(), "root");
        }

        it "creates nested directories" {
            let nested = tmp.path().join("deeply").join("nested").join("path.mbird");
            MbirdData::create().save(&nested).expect("Save failed");

            assert!(nested.join(TREE_FNAME).exists());
        }

        it "can save to the same directory twice" {
            let dir = tmp.path().join("again.mbird");
            let mut data = MbirdData::create();
            data.save(&dir).expect("First save failed");
            data.regenerate().expect("Regenerate failed");
            data.save(&dir).expect("Second save failed");

            let reloaded = MbirdData::open(&dir).expect("Load failed");
            assert!(!reloaded.root().expect("No root").is_stale());
        }

        it "fails without a root" {
            let err = MbirdData::new().save(tmp.path().join("test_dir.mbird")).unwrap_err();
            assert!(matches!(err, Error::NoRoot));
            assert_eq!(err.kind(), ErrorKind::State);
            assert!(err.to_string().contains("No root node loaded"));
        }

        it "writes indented json" {
            let dir = tmp.path().join("pretty.mbird");
            MbirdData::with_root(chain()).save(&dir).expect("Save failed");

            let text = fs::read_to_string(dir.join(TREE_FNAME)).expect("Read failed");
            assert!(text.starts_with("{\n  \"id\": \"root\""));
        }
    }

    describe "load" {
        it "preserves the tree across save and load" {
            let dir = tmp.path().join("test_dir.mbird");
            MbirdData::with_root(chain()).save(&dir).expect("Save failed");

            let loaded = MbirdData::open(&dir).expect("Load failed");
            let root = loaded.root().expect("No root");
            assert_eq!(root.id(), "root");
            assert_eq!(root.children().len(), 1);
            assert_eq!(root.children()[0].id(), "node1");
            assert_eq!(root.children()[0].children()[0].id(), "node2");
            assert_eq!(root, &chain());
        }

        it "preserves is_stale values" {
            let dir = tmp.path().join("test_stale.mbird");
            let root = MbirdNode::with_children("root", vec![MbirdNode::new("node1").stale(false)])
                .expect("Failed to build tree");
            MbirdData::with_root(root).save(&dir).expect("Save failed");

            let loaded = MbirdData::open(&dir).expect("Load failed");
            let root = loaded.root().expect("No root");
            assert!(root.is_stale());
            assert!(!root.children()[0].is_stale());
        }

        it "requires the .mbird extension" {
            let err = MbirdData::open("/some/path").unwrap_err();
            assert!(matches!(err, Error::MissingExtension { .. }));
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert!(err.to_string().contains("must have .mbird extension"));
        }

        it "does not append the extension for an existing bare directory" {
            let bare = tmp.path().join("bare");
            MbirdData::create().save(&bare).expect("Save failed");

            let err = MbirdData::open(&bare).unwrap_err();
            assert!(matches!(err, Error::MissingExtension { .. }));
        }

        it "fails for a nonexistent directory" {
            let err = MbirdData::open("/nonexistent/path.mbird").unwrap_err();
            assert!(matches!(err, Error::DirectoryNotFound { .. }));
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }

        it "fails when the path is a file" {
            let file = tmp.path().join("file.mbird");
            fs::write(&file, "{}").expect("Write failed");

            let err = MbirdData::open(&file).unwrap_err();
            assert!(matches!(err, Error::NotADirectory { .. }));
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }

        it "fails when the tree file is missing" {
            let dir = tmp.path().join("empty.mbird");
            fs::create_dir(&dir).expect("Create failed");

            let err = MbirdData::open(&dir).unwrap_err();
            assert!(matches!(err, Error::TreeFileNotFound { .. }));
        }

        it "rejects a hand-edited file with a cycle" {
            let dir = tmp.path().join("cyclic.mbird");
            fs::create_dir(&dir).expect("Create failed");
            fs::write(
                dir.join(TREE_FNAME),
                r#"{"id":"a","children":[{"id":"b","children":[{"id":"a"}]}]}"#,
            ).expect("Write failed");

            let err = MbirdData::open(&dir).unwrap_err();
            assert!(matches!(err, Error::Cycle { ref id } if id == "a"));
        }

        it "rejects a file that is not a node tree" {
            let dir = tmp.path().join("garbage.mbird");
            fs::create_dir(&dir).expect("Create failed");
            fs::write(dir.join(TREE_FNAME), r#"{"children": []}"#).expect("Write failed");

            let err = MbirdData::open(&dir).unwrap_err();
            assert!(matches!(err, Error::Malformed(_)));
        }

        it "keeps the previous root when loading fails" {
            let mut data = MbirdData::with_root(chain());
            assert!(data.load(tmp.path().join("missing.mbird")).is_err());
            assert_eq!(data.root(), Some(&chain()));
        }

        it "replaces the previous root" {
            let dir = tmp.path().join("fresh.mbird");
            MbirdData::create().save(&dir).expect("Save failed");

            let mut data = MbirdData::with_root(chain());
            data.load(&dir).expect("Load failed");
            assert!(data.root().expect("No root").children().is_empty());
        }
    }

    describe "replace" {
        it "rejects a cyclic structure and mentions the node" {
            let mut data = MbirdData::create();
            let err = data.replace(serde_json::json!({
                "id": "node1",
                "children": [{ "id": "node2", "children": [{ "id": "node1", "children": [] }] }]
            })).unwrap_err();

            assert!(err.to_string().contains("node1"));
            assert_eq!(data.root().expect("No root").id(), "root");
        }
    }

    describe "regenerate" {
        it "marks every node fresh and survives a round trip" {
            let dir = tmp.path().join("regen.mbird");
            let mut data = MbirdData::with_root(chain());
            data.regenerate().expect("Regenerate failed");
            data.regenerate().expect("Second regenerate failed");
            data.save(&dir).expect("Save failed");

            let loaded = MbirdData::open(&dir).expect("Load failed");
            assert_eq!(loaded.root().expect("No root").stale_count(), 0);
        }
    }
}
