#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use assert_cmd::Command;
    use ktdb::{EMAIL_SIZE, ROWS_PER_PAGE, TABLE_MAX_ROWS, USERNAME_SIZE};
    use predicates::prelude::*;
    use tempfile::{NamedTempFile, tempdir};

    // Helper function to run the command with a temporary database file
    fn run_commands<T: AsRef<str>>(commands: &[T]) -> Command {
        let db_path = create_db_path();
        run_commands_with_args(commands, &db_path)
    }

    fn create_db_path() -> PathBuf {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let db_path: PathBuf = temp_file.path().to_path_buf();
        db_path
    }

    fn run_commands_with_args<T: AsRef<str>>(commands: &[T], db_path: &Path) -> Command {
        let mut cmd = Command::cargo_bin("ktdb").expect("Failed to run command");
        cmd.arg(db_path.to_str().expect("Invalid path"));

        let input = commands
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        cmd.write_stdin(input);
        cmd
    }

    #[test]
    fn it_inserts_and_retrieves_a_row() {
        let mut cmd = run_commands(&["insert 1 user1 person1@example.com", "select", ".exit"]);

        let expected = [
            "db > Executed.",
            "db > (1, user1, person1@example.com)",
            "Executed.",
            "db > ",
        ]
        .join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_prints_error_message_when_table_is_full() {
        let mut commands = Vec::new();
        for i in 0..TABLE_MAX_ROWS + 1 {
            commands.push(format!("insert {i} user{i} person{i}@example.com"));
        }
        commands.push(String::from(".exit"));

        let mut cmd = run_commands(&commands);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("db > Error: Table full."));
    }

    #[test]
    fn it_only_fails_the_insert_past_capacity() {
        let mut commands = Vec::new();
        for i in 0..TABLE_MAX_ROWS + 1 {
            commands.push(format!("insert {i} user{i} person{i}@example.com"));
        }
        commands.push(String::from(".exit"));

        let output = run_commands(&commands).output().expect("Failed to run");
        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8");

        assert_eq!(stdout.matches("Executed.").count(), TABLE_MAX_ROWS);
        assert_eq!(stdout.matches("Error: Table full.").count(), 1);
        assert!(stdout.ends_with("db > Error: Table full.\ndb > "));
    }

    #[test]
    fn it_respects_the_max_pages_flag() {
        let mut commands = Vec::new();
        for i in 0..ROWS_PER_PAGE + 1 {
            commands.push(format!("insert {i} user{i} person{i}@example.com"));
        }
        commands.push(String::from(".exit"));

        let mut cmd = run_commands(&commands);
        cmd.arg("--max-pages").arg("1");

        cmd.assert()
            .success()
            .stdout(predicate::str::ends_with("db > Error: Table full.\ndb > "));
    }

    #[test]
    fn it_fills_and_save_full_table() {
        let mut commands = Vec::new();
        let mut expected = Vec::new();
        for i in 0..TABLE_MAX_ROWS {
            commands.push(format!("insert {i} user{i} person{i}@example.com"));
            expected.push(format!("({i}, user{i}, person{i}@example.com)"));
        }
        commands.push(String::from(".exit"));

        let db_path = create_db_path();
        let mut cmd = run_commands_with_args(&commands, &db_path);

        cmd.assert()
            .success()
            .stdout(predicate::str::ends_with("db > "));

        let mut cmd = run_commands_with_args(&["select", ".exit"], &db_path);
        let expected = expected.join("\n");
        cmd.assert()
            .success()
            .stdout(predicate::str::contains(expected));

        let mut cmd = run_commands_with_args(&["insert 0 a b", ".exit"], &db_path);
        cmd.assert()
            .success()
            .stdout("db > Error: Table full.\ndb > ");
    }

    #[test]
    fn it_allows_inserting_strings_that_are_the_maximum_length() {
        let long_username = "a".repeat(USERNAME_SIZE);
        let long_email = "a".repeat(EMAIL_SIZE);

        let commands_string = [
            format!("insert 1 {} {}", &long_username, &long_email),
            String::from("select"),
            String::from(".exit"),
        ];

        let commands_slice: Vec<&str> = commands_string.iter().map(|s| s.as_str()).collect();

        let mut cmd = run_commands(&commands_slice);

        let expected = [
            String::from("db > Executed."),
            format!("db > (1, {}, {})", long_username, long_email),
            String::from("Executed."),
            String::from("db > "),
        ]
        .join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_prints_error_message_if_strings_are_too_long() {
        let long_username = "a".repeat(USERNAME_SIZE + 1);
        let long_email = "a".repeat(EMAIL_SIZE + 1);

        let commands_string = [
            format!("insert 1 {} {}", &long_username, &long_email),
            String::from("select"),
            String::from(".exit"),
        ];

        let commands_slice: Vec<&str> = commands_string.iter().map(|s| s.as_str()).collect();

        let mut cmd = run_commands(&commands_slice);

        let expected = ["db > String is too long.", "db > Executed.", "db > "].join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_prints_error_message_if_id_is_negative() {
        let mut cmd = run_commands(&["insert -1 user1 person1@example.com", "select", ".exit"]);

        let expected = ["db > ID must be positive.", "db > Executed.", "db > "].join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_prints_syntax_and_unrecognized_errors() {
        let mut cmd = run_commands(&["insert 1 user1", "delete 1", ".tables", ".exit"]);

        let expected = [
            "db > Syntax error. Could not parse statement.",
            "db > Unrecognized command: delete 1",
            "db > Unrecognized meta-command: .tables",
            "db > ",
        ]
        .join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_keeps_going_after_a_line_that_is_not_utf8() {
        let mut cmd = Command::cargo_bin("ktdb").expect("Failed to run command");
        cmd.arg(create_db_path().to_str().expect("Invalid path"));
        cmd.write_stdin(b"insert 1 user1 a@b\ninsert 2 \xff\xfe x@y\nselect\n.exit\n".to_vec());

        let expected = [
            "db > Executed.",
            "db > Syntax error. Could not parse statement.",
            "db > (1, user1, a@b)",
            "Executed.",
            "db > ",
        ]
        .join("\n");

        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_keeps_data_after_closing_connection() {
        let db_path = create_db_path();

        let mut cmd =
            run_commands_with_args(&["insert 1 user1 person1@example.com", ".exit"], &db_path);
        let expected = ["db > Executed.", "db > "].join("\n");
        cmd.assert().success().stdout(expected);

        let mut cmd = run_commands_with_args(&["select", ".exit"], &db_path);
        let expected = ["db > (1, user1, person1@example.com)\nExecuted.", "db > "].join("\n");
        cmd.assert().success().stdout(expected);
    }

    #[test]
    fn it_saves_on_end_of_input() {
        let db_path = create_db_path();

        let mut cmd = run_commands_with_args(&["insert 1 user1 person1@example.com"], &db_path);
        cmd.assert().success();

        let mut cmd = run_commands_with_args(&["select", ".exit"], &db_path);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("(1, user1, person1@example.com)"));
    }

    #[test]
    fn it_refuses_to_start_on_a_corrupted_file() {
        let db_path = create_db_path();
        // An id followed by a username length prefix with no bytes behind it.
        let mut bytes = 1i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&10u32.to_le_bytes());
        std::fs::write(&db_path, bytes).expect("Failed to write file");

        let output = run_commands_with_args(&["select", ".exit"], &db_path)
            .output()
            .expect("Failed to run");
        let stderr = String::from_utf8(output.stderr).expect("Invalid UTF-8");

        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        assert_eq!(stderr.matches("corrupted database file").count(), 1);
    }

    #[test]
    fn it_uses_the_default_path_when_none_is_given() {
        let dir = tempdir().expect("Failed to create temporary dir");

        let mut cmd = Command::cargo_bin("ktdb").expect("Failed to run command");
        cmd.current_dir(dir.path())
            .write_stdin("insert 1 user1 person1@example.com\n.exit");
        cmd.assert().success();

        assert!(dir.path().join("db").join("ktdb.db").exists());
    }
}
