//! Node.js micro-service project scaffolding.
//!
//! Writes a small Express service skeleton (server, health and test
//! controllers, abstract model, mock store) under `<parent>/<name>/`.

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A file written by the scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Result of a scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub files: Vec<WrittenFile>,
}

/// (relative path, template) pairs. `{{name}}` is replaced by the project name.
const TEMPLATES: &[(&str, &str)] = &[
    ("package.json", PACKAGE_JSON),
    ("index.js", INDEX_JS),
    (".gitignore", GITIGNORE),
    ("README.md", README_MD),
    ("Server.js", SERVER_JS),
    ("store-mock.json", STORE_MOCK_JSON),
    ("connectors/EMPTY", ""),
    ("controllers/Abstract.js", ABSTRACT_CONTROLLER_JS),
    ("controllers/HealthController.js", HEALTH_CONTROLLER_JS),
    ("controllers/testController.js", TEST_CONTROLLER_JS),
    ("models/AbstractModel.js", ABSTRACT_MODEL_JS),
];

/// Create the project skeleton.
///
/// Fails without touching anything if `<parent>/<name>` already exists.
pub fn create_project(parent: &Path, name: &str, show_progress: bool) -> Result<ScaffoldReport> {
    let root = parent.join(name);
    if root.exists() {
        bail!("Project directory already exists: {}", root.display());
    }

    info!("Creating project {} in {}", name, root.display());

    let progress = if show_progress {
        let pb = ProgressBar::new(TEMPLATES.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut files = Vec::with_capacity(TEMPLATES.len());
    for (relative, template) in TEMPLATES {
        let path = root.join(relative);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let content = template.replace("{{name}}", name);
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("wrote {} ({} bytes)", path.display(), content.len());
        progress.set_message(relative.to_string());
        progress.inc(1);

        files.push(WrittenFile {
            path,
            bytes: content.len(),
        });
    }

    progress.finish_and_clear();

    Ok(ScaffoldReport { root, files })
}

const PACKAGE_JSON: &str = r#"{
  "name": "{{name}}",
  "version": "1.0.0",
  "description": "{{name}} micro-service",
  "main": "index.js",
  "scripts": {
    "start": "node index.js",
    "test": "node controllers/testController.js"
  },
  "license": "MIT",
  "dependencies": {
    "body-parser": "^1.20.2",
    "express": "^4.19.2"
  }
}
"#;

const INDEX_JS: &str = r#"const Server = require('./Server');

const port = process.env.PORT || 3000;
new Server(port).start();
"#;

const GITIGNORE: &str = "node_modules/\nnpm-debug.log\n.env\n";

const README_MD: &str = r#"# {{name}}

Micro-service skeleton.

```sh
npm install
npm start
```

- `GET /health` reports liveness.
- `GET /test` lists the records of `store-mock.json`.
"#;

const SERVER_JS: &str = r#"const express = require('express');
const bodyParser = require('body-parser');
const HealthController = require('./controllers/HealthController');
const TestController = require('./controllers/testController');

class Server {
  constructor(port) {
    this.port = port;
    this.app = express();
    this.app.use(bodyParser.json());
    new HealthController(this.app, '/health');
    new TestController(this.app, '/test');
  }

  start() {
    this.app.listen(this.port, () => {
      console.log(`{{name}} listening on port ${this.port}`);
    });
  }
}

module.exports = Server;
"#;

const STORE_MOCK_JSON: &str = r#"{
  "items": [
    { "id": 1, "label": "first" },
    { "id": 2, "label": "second" }
  ]
}
"#;

const ABSTRACT_CONTROLLER_JS: &str = r#"class Abstract {
  constructor(app, route) {
    this.app = app;
    this.route = route;
    this.register();
  }

  register() {
    throw new Error('register() must be implemented');
  }
}

module.exports = Abstract;
"#;

const HEALTH_CONTROLLER_JS: &str = r#"const Abstract = require('./Abstract');

class HealthController extends Abstract {
  register() {
    this.app.get(this.route, (req, res) => res.json({ status: 'ok', service: '{{name}}' }));
  }
}

module.exports = HealthController;
"#;

const TEST_CONTROLLER_JS: &str = r#"const Abstract = require('./Abstract');
const AbstractModel = require('../models/AbstractModel');

class TestController extends Abstract {
  register() {
    const model = new AbstractModel('items');
    this.app.get(this.route, (req, res) => res.json(model.all()));
  }
}

module.exports = TestController;
"#;

const ABSTRACT_MODEL_JS: &str = r#"const store = require('../store-mock.json');

class AbstractModel {
  constructor(collection) {
    this.collection = collection;
  }

  all() {
    return store[this.collection] || [];
  }
}

module.exports = AbstractModel;
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_writes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let report = create_project(dir.path(), "svc", false).unwrap();

        assert_eq!(report.root, dir.path().join("svc"));
        assert_eq!(report.files.len(), TEMPLATES.len());

        for file in &report.files {
            let written = std::fs::read_to_string(&file.path).unwrap();
            assert_eq!(written.len(), file.bytes);
        }

        let package = std::fs::read_to_string(report.root.join("package.json")).unwrap();
        assert!(package.contains(r#""name": "svc""#));
        assert!(!package.contains("{{name}}"));

        assert!(report.root.join("connectors/EMPTY").is_file());
        assert!(report.root.join("controllers/HealthController.js").is_file());
        assert!(report.root.join("models/AbstractModel.js").is_file());
    }

    #[test]
    fn test_existing_directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("svc")).unwrap();

        let err = create_project(dir.path(), "svc", false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(!dir.path().join("svc/package.json").exists());
    }

    #[test]
    fn test_package_json_is_valid() {
        let content = PACKAGE_JSON.replace("{{name}}", "demo");
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["name"], "demo");
    }
}
