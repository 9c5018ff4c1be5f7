//! End-to-end ready check scenarios live in `tests/`.
