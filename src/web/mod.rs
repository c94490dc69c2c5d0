// Server-rendered pages (Askama) and HTML form handlers

pub mod handlers;
