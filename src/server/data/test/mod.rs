mod credit;
mod listing;
mod notification;
mod reminder;
mod session;
mod staff;
mod team;
mod user;
mod vanity;
mod vote;
mod webhook;
