use std::collections::VecDeque;

use crate::config::Mode;

/// States waiting to be visited - the only thing that differs between DFS and BFS.
#[derive(Debug)]
pub(crate) enum Frontier<T> {
    Stack(Vec<T>),
    Queue(VecDeque<T>),
}

impl<T> Frontier<T> {
    pub(crate) fn new(mode: Mode) -> Self {
        match mode {
            Mode::Dfs => Frontier::Stack(Vec::new()),
            Mode::Bfs => Frontier::Queue(VecDeque::new()),
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        match self {
            Frontier::Stack(stack) => stack.push(item),
            Frontier::Queue(queue) => queue.push_back(item),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Frontier::Stack(stack) => stack.len(),
            Frontier::Queue(queue) => queue.len(),
        }
    }
}
